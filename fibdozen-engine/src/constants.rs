//! Centralized wheel and payout constants for the simulation core.
//!
//! These values define the odds the progression is played against. Keeping
//! them together means the house rules can only change through a reviewed
//! code change.

use std::ops::RangeInclusive;

// Wheel -------------------------------------------------------------------
/// Highest pocket on a single-zero wheel; pockets run `0..=MAX_POCKET`.
pub const MAX_POCKET: u8 = 36;
/// Number of equally likely outcomes per spin.
pub const POCKET_COUNT: u8 = MAX_POCKET + 1;
/// Pockets covered by the third-dozen bet.
pub const THIRD_DOZEN: RangeInclusive<u8> = 25..=36;
/// Count of winning pockets for the third dozen.
pub const WINNING_POCKETS: u8 = 12;

// Payout ------------------------------------------------------------------
/// Gross return on a winning dozen bet (stake back plus 2:1).
pub const PAYOUT_MULTIPLE: u32 = 3;

// Progression -------------------------------------------------------------
/// Progression index every cycle starts from.
pub const FIRST_INDEX: u32 = 1;
/// Cycle counter value at the start of a run.
pub const FIRST_CYCLE: u32 = 1;

/// Probability that one spin lands in the third dozen.
#[must_use]
pub fn win_probability() -> f64 {
    f64::from(WINNING_POCKETS) / f64::from(POCKET_COUNT)
}
