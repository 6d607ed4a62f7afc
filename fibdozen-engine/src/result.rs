//! End-of-run summary calculation
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_CYCLE, win_probability};
use crate::numbers::{count_pct, exponent_from_u32};
use crate::record::SpinRecord;
use crate::session::{BettingSession, StopReason};

/// Aggregate statistics for a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_balance: Decimal,
    pub final_balance: Decimal,
    pub net_result: Decimal,
    pub total_spins: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_pct: Decimal,
    pub loss_pct: Decimal,
    pub cycles_completed: u32,
    pub largest_bet: Decimal,
    pub largest_progression_index: u32,
    /// `(12/37) ^ largest_progression_index`; descriptive only
    pub streak_odds: f64,
    pub stop_reason: StopReason,
}

/// Summarize a finished session and its log.
///
/// Maxima come from the log; an empty log falls back to a zero bet and the
/// session's high-water index.
#[must_use]
pub fn summarize(
    session: &BettingSession,
    records: &[SpinRecord],
    stop_reason: StopReason,
) -> RunSummary {
    let largest_bet = records
        .iter()
        .map(|r| r.bet)
        .max()
        .unwrap_or(Decimal::ZERO);
    let largest_progression_index = records
        .iter()
        .map(|r| r.progression_index)
        .max()
        .unwrap_or_else(|| session.largest_progression_index());
    let total_spins = session.spin_count();

    RunSummary {
        start_balance: session.start_balance(),
        final_balance: session.balance(),
        net_result: session.profit(),
        total_spins,
        wins: session.win_count(),
        losses: session.loss_count(),
        win_pct: count_pct(session.win_count(), total_spins),
        loss_pct: count_pct(session.loss_count(), total_spins),
        cycles_completed: session.cycle().saturating_sub(FIRST_CYCLE),
        largest_bet,
        largest_progression_index,
        streak_odds: streak_odds(largest_progression_index),
        stop_reason,
    }
}

/// `(12/37) ^ index`
#[must_use]
pub fn streak_odds(index: u32) -> f64 {
    win_probability().powi(exponent_from_u32(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_log_is_guarded() {
        let session = BettingSession::new(dec!(100), dec!(10), None, dec!(20));
        let summary = summarize(&session, &[], StopReason::SpinLimit);
        assert_eq!(summary.total_spins, 0);
        assert_eq!(summary.win_pct, Decimal::ZERO);
        assert_eq!(summary.loss_pct, Decimal::ZERO);
        assert_eq!(summary.largest_bet, Decimal::ZERO);
        assert_eq!(summary.largest_progression_index, 1);
        assert_eq!(summary.net_result, Decimal::ZERO);
    }

    #[test]
    fn streak_odds_formula() {
        assert!((streak_odds(1) - 12.0 / 37.0).abs() < 1e-12);
        assert!((streak_odds(3) - (12.0_f64 / 37.0).powi(3)).abs() < 1e-12);
        assert!(streak_odds(2) < streak_odds(1));
    }
}
