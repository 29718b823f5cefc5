use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

pub const DEFAULT_STARTING_CARDS: u8 = 7;
pub const STARTING_CARDS_RANGE: RangeInclusive<u8> = 1..=12;

/// Hand size that eliminates a player when elimination is enabled.
pub const ELIMINATION_THRESHOLD: usize = 25;
/// Cards dealt by a mercy coin.
pub const MERCY_HAND_SIZE: usize = 7;

/// Safety cap for draw-until-playable.
pub const DRAW_UNTIL_PLAYABLE_CAP: usize = 20;
/// Safety cap for draw-color / color-roulette draws.
pub const DRAW_COLOR_CAP: usize = 25;

pub const SUDDEN_DEATH_HAND_SIZE: usize = 24;

/// Final attack: this many action cards triggers the big hit.
pub const FINAL_ATTACK_THRESHOLD: usize = 7;
pub const FINAL_ATTACK_NEXT_DRAW: usize = 25;
pub const FINAL_ATTACK_OTHERS_DRAW: usize = 5;

/// No Mercy+ "10" is the play-again number.
pub const PLAY_AGAIN_NUMBER: u8 = 10;
pub const SWAP_NUMBER: u8 = 7;
pub const ROTATE_NUMBER: u8 = 0;

pub const fn player_count_valid(n: usize) -> bool {
    n >= MIN_PLAYERS && n <= MAX_PLAYERS
}

/// Next starting-card count when the lobby cycles the option.
pub fn next_starting_cards(current: u8) -> u8 {
    if current >= *STARTING_CARDS_RANGE.end() {
        *STARTING_CARDS_RANGE.start()
    } else {
        current + 1
    }
}
