//! Outcome generation for a single-zero wheel.
//!
//! The driver only sees [`SpinSource`], so deterministic tests can swap the
//! seeded [`Wheel`] for a [`ScriptedWheel`].

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_POCKET, THIRD_DOZEN};

/// Result of one spin: the pocket hit and whether the third dozen won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub number: u8,
    pub won: bool,
}

impl SpinOutcome {
    /// Derive the outcome for a pocket number.
    #[must_use]
    pub fn from_number(number: u8) -> Self {
        Self {
            number,
            won: THIRD_DOZEN.contains(&number),
        }
    }
}

/// Source of independent spins (sampling with replacement).
pub trait SpinSource {
    /// Produce the next spin.
    fn spin(&mut self) -> SpinOutcome;
}

/// Pseudorandom wheel drawing uniformly from `0..=36`.
#[derive(Debug, Clone)]
pub struct Wheel<R = ChaCha20Rng> {
    rng: R,
    draws: u64,
}

impl Wheel<ChaCha20Rng> {
    /// Deterministic wheel for a user-visible seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Wheel<R> {
    /// Wrap an arbitrary RNG.
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of spins drawn from this wheel.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> SpinSource for Wheel<R> {
    fn spin(&mut self) -> SpinOutcome {
        self.draws = self.draws.saturating_add(1);
        SpinOutcome::from_number(self.rng.gen_range(0..=MAX_POCKET))
    }
}

/// Replays a fixed list of pockets, wrapping around when exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedWheel {
    numbers: Vec<u8>,
    cursor: usize,
}

impl ScriptedWheel {
    /// Pocket used when a scripted spin should lose.
    pub const LOSING_POCKET: u8 = 0;
    /// Pocket used when a scripted spin should win.
    pub const WINNING_POCKET: u8 = 36;

    /// Replay the given pockets in order. An empty script behaves like
    /// [`ScriptedWheel::always_lose`].
    #[must_use]
    pub fn from_numbers(numbers: Vec<u8>) -> Self {
        let numbers = if numbers.is_empty() {
            vec![Self::LOSING_POCKET]
        } else {
            numbers
        };
        Self { numbers, cursor: 0 }
    }

    /// Replay a win/loss pattern using one representative pocket per result.
    #[must_use]
    pub fn from_results(results: &[bool]) -> Self {
        Self::from_numbers(
            results
                .iter()
                .map(|&won| {
                    if won {
                        Self::WINNING_POCKET
                    } else {
                        Self::LOSING_POCKET
                    }
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn always_lose() -> Self {
        Self::from_numbers(vec![Self::LOSING_POCKET])
    }

    #[must_use]
    pub fn always_win() -> Self {
        Self::from_numbers(vec![Self::WINNING_POCKET])
    }
}

impl SpinSource for ScriptedWheel {
    fn spin(&mut self) -> SpinOutcome {
        let number = self.numbers[self.cursor % self.numbers.len()];
        self.cursor = (self.cursor + 1) % self.numbers.len();
        SpinOutcome::from_number(number)
    }
}
