//! Engine test support utilities
//!
//! Shared by the engine's unit tests and integration tests: a unified logging
//! bootstrap and the proptest configuration every property suite starts from.

pub mod logging;
pub mod proptest_prelude;
