//! Service-level error type.
//!
//! Engine rejections travel inside [`AppError::Rejected`] untouched so the
//! caller can still match on the exact [`ValidationKind`].

use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Rejected: {0}")]
    Rejected(DomainError),
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Session busy: {detail}")]
    Busy { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Rejected(err) => err.code(),
            AppError::NotFound { code, .. } => *code,
            AppError::Busy { .. } => ErrorCode::SessionBusy,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// The rule violation behind a rejection, if that is what this is.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            AppError::Rejected(err) => err.validation_kind(),
            _ => None,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        match err {
            DomainError::Conflict(ConflictKind::SessionBusy, detail) => AppError::Busy { detail },
            DomainError::NotFound(_, detail) => AppError::NotFound { code, detail },
            DomainError::Infra(_, detail) => AppError::Internal { code, detail },
            other => AppError::Rejected(other),
        }
    }
}
