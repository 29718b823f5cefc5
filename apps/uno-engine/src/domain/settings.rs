//! House-rule settings bag and the toggle rules enforced while a lobby edits it.

use serde::{Deserialize, Serialize};

use super::rules::{self, DEFAULT_STARTING_CARDS, STARTING_CARDS_RANGE};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Classic,
    Flip,
    NoMercy,
    NoMercyPlus,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Flip,
        Variant::NoMercy,
        Variant::NoMercyPlus,
    ];

    pub const fn is_no_mercy(self) -> bool {
        matches!(self, Variant::NoMercy | Variant::NoMercyPlus)
    }

    pub const fn has_coins(self) -> bool {
        matches!(self, Variant::NoMercyPlus)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Flip => "flip",
            Variant::NoMercy => "no_mercy",
            Variant::NoMercyPlus => "no_mercy_plus",
        }
    }
}

/// A boolean house rule the lobby can switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    StackPlusTwo,
    StackPlusFour,
    StackCombined,
    StackFlipDraw,
    StackNoMercyDraw,
    StackColors,
    StackNumbers,
    AutoDraw,
    DrawUntilPlayable,
    SkipAfterDraw,
    MustPlay,
    UnoCallout,
    SevenZero,
    JumpIn,
    FirstWin,
    Elimination,
}

impl Toggle {
    pub const DRAW_POLICIES: [Toggle; 4] = [
        Toggle::AutoDraw,
        Toggle::DrawUntilPlayable,
        Toggle::SkipAfterDraw,
        Toggle::MustPlay,
    ];

    pub fn is_draw_policy(self) -> bool {
        Self::DRAW_POLICIES.contains(&self)
    }

    /// Policies switched off when this one is switched on.
    fn clears(self) -> &'static [Toggle] {
        match self {
            Toggle::AutoDraw => &[Toggle::DrawUntilPlayable, Toggle::MustPlay],
            Toggle::DrawUntilPlayable => &[Toggle::AutoDraw, Toggle::SkipAfterDraw],
            Toggle::SkipAfterDraw => &[Toggle::DrawUntilPlayable],
            Toggle::MustPlay => &[Toggle::AutoDraw],
            _ => &[],
        }
    }
}

/// House rules fixed at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub variant: Variant,
    pub starting_cards: u8,

    pub stack_plus_two: bool,
    pub stack_plus_four: bool,
    /// Cross-kind stacking (+2 on wild+4, +1 on +5)
    pub stack_combined: bool,
    pub stack_flip_draw: bool,
    pub stack_no_mercy_draw: bool,

    /// Layering by color
    pub stack_colors: bool,
    /// Layering by number
    pub stack_numbers: bool,

    pub auto_draw: bool,
    pub draw_until_playable: bool,
    pub skip_after_draw: bool,
    pub must_play: bool,

    pub uno_callout: bool,
    pub penalty_cards: u8,
    pub penalty_false_uno: u8,

    pub seven_zero: bool,
    pub jump_in: bool,
    /// Game ends at the first emptied hand; otherwise last player standing
    pub first_win: bool,
    pub elimination: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            starting_cards: DEFAULT_STARTING_CARDS,
            stack_plus_two: true,
            stack_plus_four: false,
            stack_combined: false,
            stack_flip_draw: false,
            stack_no_mercy_draw: false,
            stack_colors: false,
            stack_numbers: false,
            auto_draw: false,
            draw_until_playable: false,
            skip_after_draw: true,
            must_play: false,
            uno_callout: true,
            penalty_cards: 2,
            penalty_false_uno: 2,
            seven_zero: false,
            jump_in: false,
            first_win: true,
            elimination: false,
        }
    }
}

impl Settings {
    pub fn for_variant(variant: Variant) -> Self {
        let mut settings = Self::default();
        settings.set_variant(variant);
        settings
    }

    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::StackPlusTwo => self.stack_plus_two,
            Toggle::StackPlusFour => self.stack_plus_four,
            Toggle::StackCombined => self.stack_combined,
            Toggle::StackFlipDraw => self.stack_flip_draw,
            Toggle::StackNoMercyDraw => self.stack_no_mercy_draw,
            Toggle::StackColors => self.stack_colors,
            Toggle::StackNumbers => self.stack_numbers,
            Toggle::AutoDraw => self.auto_draw,
            Toggle::DrawUntilPlayable => self.draw_until_playable,
            Toggle::SkipAfterDraw => self.skip_after_draw,
            Toggle::MustPlay => self.must_play,
            Toggle::UnoCallout => self.uno_callout,
            Toggle::SevenZero => self.seven_zero,
            Toggle::JumpIn => self.jump_in,
            Toggle::FirstWin => self.first_win,
            Toggle::Elimination => self.elimination,
        }
    }

    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::StackPlusTwo => &mut self.stack_plus_two,
            Toggle::StackPlusFour => &mut self.stack_plus_four,
            Toggle::StackCombined => &mut self.stack_combined,
            Toggle::StackFlipDraw => &mut self.stack_flip_draw,
            Toggle::StackNoMercyDraw => &mut self.stack_no_mercy_draw,
            Toggle::StackColors => &mut self.stack_colors,
            Toggle::StackNumbers => &mut self.stack_numbers,
            Toggle::AutoDraw => &mut self.auto_draw,
            Toggle::DrawUntilPlayable => &mut self.draw_until_playable,
            Toggle::SkipAfterDraw => &mut self.skip_after_draw,
            Toggle::MustPlay => &mut self.must_play,
            Toggle::UnoCallout => &mut self.uno_callout,
            Toggle::SevenZero => &mut self.seven_zero,
            Toggle::JumpIn => &mut self.jump_in,
            Toggle::FirstWin => &mut self.first_win,
            Toggle::Elimination => &mut self.elimination,
        }
    }

    /// Toggles fixed by the current variant.
    pub fn is_locked(&self, toggle: Toggle) -> bool {
        self.variant.is_no_mercy()
            && matches!(
                toggle,
                Toggle::StackNoMercyDraw
                    | Toggle::StackCombined
                    | Toggle::SevenZero
                    | Toggle::Elimination
            )
    }

    /// Switch a rule on or off. Rejections leave the bag untouched.
    pub fn set(&mut self, toggle: Toggle, on: bool) -> Result<(), DomainError> {
        if self.is_locked(toggle) {
            return Err(DomainError::validation(
                ValidationKind::SettingsConflict,
                format!("{toggle:?} is locked by the {} variant", self.variant.as_str()),
            ));
        }
        if self.get(toggle) == on {
            return Ok(());
        }

        let mut next = self.clone();
        *next.slot(toggle) = on;
        if on {
            for cleared in toggle.clears() {
                *next.slot(*cleared) = false;
            }
        }

        if toggle.is_draw_policy() && !next.any_draw_policy() {
            return Err(DomainError::validation(
                ValidationKind::SettingsConflict,
                "At least one draw policy must stay enabled",
            ));
        }

        *self = next;
        Ok(())
    }

    pub fn toggle(&mut self, toggle: Toggle) -> Result<(), DomainError> {
        let on = !self.get(toggle);
        self.set(toggle, on)
    }

    pub fn any_draw_policy(&self) -> bool {
        Toggle::DRAW_POLICIES.iter().any(|t| self.get(*t))
    }

    /// Select a variant and apply the rules it forces. Rules forced by the
    /// previous variant fall back to their defaults first.
    pub fn set_variant(&mut self, variant: Variant) {
        let defaults = Self::default();
        match self.variant {
            Variant::Classic => {}
            Variant::Flip => {
                self.stack_plus_two = defaults.stack_plus_two;
                self.stack_plus_four = defaults.stack_plus_four;
                self.stack_flip_draw = defaults.stack_flip_draw;
                self.stack_combined = defaults.stack_combined;
            }
            Variant::NoMercy | Variant::NoMercyPlus => {
                self.stack_no_mercy_draw = defaults.stack_no_mercy_draw;
                self.stack_combined = defaults.stack_combined;
                self.seven_zero = defaults.seven_zero;
                self.elimination = defaults.elimination;
            }
        }

        self.variant = variant;
        match variant {
            Variant::Classic => {}
            Variant::Flip => {
                self.stack_plus_two = false;
                self.stack_plus_four = false;
                self.stack_flip_draw = true;
                self.stack_combined = true;
                self.seven_zero = false;
            }
            Variant::NoMercy | Variant::NoMercyPlus => {
                self.stack_no_mercy_draw = true;
                self.stack_combined = true;
                self.seven_zero = true;
                self.elimination = true;
            }
        }
    }

    pub fn set_starting_cards(&mut self, n: u8) -> Result<(), DomainError> {
        if !STARTING_CARDS_RANGE.contains(&n) {
            return Err(DomainError::validation(
                ValidationKind::InvalidSetting,
                format!("Starting cards must be within {STARTING_CARDS_RANGE:?}, got {n}"),
            ));
        }
        self.starting_cards = n;
        Ok(())
    }

    pub fn cycle_starting_cards(&mut self) -> u8 {
        self.starting_cards = rules::next_starting_cards(self.starting_cards);
        self.starting_cards
    }

    /// Whether any layering rule allows multi-card plays.
    pub fn layering(&self) -> bool {
        self.stack_colors || self.stack_numbers
    }
}
