//! Betting session state machine for the Fibonacci dozens progression.
//!
//! A session owns the bankroll, the progression position, and the counters.
//! [`BettingSession::place_bet`] is the only operation that mutates it; the
//! stop decision is left to the caller via [`BettingSession::reached_target`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SimulationConfig;
use crate::constants::{FIRST_CYCLE, FIRST_INDEX, PAYOUT_MULTIPLE};
use crate::fibonacci::FibonacciTable;
use crate::numbers::multiplier_to_decimal;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Profit reached the configured target
    TargetReached,
    /// The bankroll was exhausted
    Bankrupt,
    /// The spin cap was hit before either other condition
    SpinLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TargetReached => write!(f, "target_reached"),
            StopReason::Bankrupt => write!(f, "bankrupt"),
            StopReason::SpinLimit => write!(f, "spin_limit"),
        }
    }
}

/// Mutable state of one progression run.
#[derive(Debug, Clone)]
pub struct BettingSession {
    start_balance: Decimal,
    balance: Decimal,
    unit_bet: Decimal,
    // zero means uncapped
    max_bet: Decimal,
    target_profit: Decimal,
    progression_index: u32,
    current_bet: Decimal,
    spin_count: u64,
    win_count: u64,
    loss_count: u64,
    cycle: u32,
    largest_progression_index: u32,
    fibonacci: FibonacciTable,
}

impl BettingSession {
    /// Start a session. Inputs are expected to have passed
    /// [`SimulationConfig::validate`].
    #[must_use]
    pub fn new(
        start_balance: Decimal,
        unit_bet: Decimal,
        max_bet: Option<Decimal>,
        target_profit: Decimal,
    ) -> Self {
        Self {
            start_balance,
            balance: start_balance,
            unit_bet,
            max_bet: max_bet.unwrap_or(Decimal::ZERO),
            target_profit,
            progression_index: FIRST_INDEX,
            current_bet: unit_bet,
            spin_count: 0,
            win_count: 0,
            loss_count: 0,
            cycle: FIRST_CYCLE,
            largest_progression_index: FIRST_INDEX,
            fibonacci: FibonacciTable::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.start_balance,
            config.unit_bet,
            config.max_bet,
            config.target_profit,
        )
    }

    /// Place one wager at the current progression index and resolve it.
    ///
    /// Returns the progression index the wager was placed at, captured before
    /// a win resets it.
    pub fn place_bet(&mut self, won: bool) -> u32 {
        let index = self.progression_index;
        self.largest_progression_index = self.largest_progression_index.max(index);

        self.current_bet = self.wager_for(index);
        self.balance -= self.current_bet;

        if won {
            let payout = self
                .current_bet
                .saturating_mul(Decimal::from(PAYOUT_MULTIPLE));
            self.balance = self.balance.saturating_add(payout);
            self.progression_index = FIRST_INDEX;
            self.win_count += 1;
            self.cycle = self.cycle.saturating_add(1);
        } else {
            self.progression_index = self.progression_index.saturating_add(1);
            self.loss_count += 1;
        }

        self.spin_count += 1;
        index
    }

    /// Wager for `index`: `unit × F(index)`, capped by the balance and then
    /// by the maximum bet when one is set.
    pub fn wager_for(&mut self, index: u32) -> Decimal {
        let multiplier = multiplier_to_decimal(self.fibonacci.get(index));
        let mut wager = self.unit_bet.saturating_mul(multiplier);
        if wager > self.balance {
            wager = self.balance;
        }
        if self.max_bet > Decimal::ZERO && wager > self.max_bet {
            wager = self.max_bet;
        }
        wager
    }

    /// Memoized Fibonacci multiplier for `index`.
    pub fn multiplier(&mut self, index: u32) -> u128 {
        self.fibonacci.get(index)
    }

    #[must_use]
    pub fn profit(&self) -> Decimal {
        self.balance - self.start_balance
    }

    /// True once profit meets the target or the bankroll is gone.
    #[must_use]
    pub fn reached_target(&self) -> bool {
        self.stop_reason().is_some()
    }

    /// Which side of the stopping predicate holds, if any.
    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        if self.profit() >= self.target_profit {
            Some(StopReason::TargetReached)
        } else if self.balance <= Decimal::ZERO {
            Some(StopReason::Bankrupt)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn start_balance(&self) -> Decimal {
        self.start_balance
    }

    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    #[must_use]
    pub const fn unit_bet(&self) -> Decimal {
        self.unit_bet
    }

    /// Wager cap, `None` when uncapped.
    #[must_use]
    pub fn max_bet(&self) -> Option<Decimal> {
        (self.max_bet > Decimal::ZERO).then_some(self.max_bet)
    }

    #[must_use]
    pub const fn target_profit(&self) -> Decimal {
        self.target_profit
    }

    #[must_use]
    pub const fn progression_index(&self) -> u32 {
        self.progression_index
    }

    #[must_use]
    pub const fn current_bet(&self) -> Decimal {
        self.current_bet
    }

    #[must_use]
    pub const fn spin_count(&self) -> u64 {
        self.spin_count
    }

    #[must_use]
    pub const fn win_count(&self) -> u64 {
        self.win_count
    }

    #[must_use]
    pub const fn loss_count(&self) -> u64 {
        self.loss_count
    }

    #[must_use]
    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    #[must_use]
    pub const fn largest_progression_index(&self) -> u32 {
        self.largest_progression_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn session(balance: Decimal, unit: Decimal, max_bet: Option<Decimal>) -> BettingSession {
        BettingSession::new(balance, unit, max_bet, dec!(20))
    }

    #[test]
    fn starts_at_first_index_and_cycle() {
        let s = session(dec!(100), dec!(10), None);
        assert_eq!(s.progression_index(), 1);
        assert_eq!(s.cycle(), 1);
        assert_eq!(s.largest_progression_index(), 1);
        assert_eq!(s.current_bet(), dec!(10));
        assert_eq!(s.spin_count(), 0);
        assert!(!s.reached_target());
    }

    #[test]
    fn single_win_pays_three_to_one_gross() {
        let mut s = session(dec!(100), dec!(10), None);
        assert_eq!(s.place_bet(true), 1);
        assert_eq!(s.balance(), dec!(120));
        assert_eq!(s.progression_index(), 1);
        assert_eq!(s.win_count(), 1);
        assert_eq!(s.loss_count(), 0);
        assert_eq!(s.cycle(), 2);
        assert_eq!(s.stop_reason(), Some(StopReason::TargetReached));
    }

    #[test]
    fn single_loss_advances_progression() {
        let mut s = session(dec!(100), dec!(10), None);
        assert_eq!(s.place_bet(false), 1);
        assert_eq!(s.balance(), dec!(90));
        assert_eq!(s.progression_index(), 2);
        assert_eq!(s.loss_count(), 1);
        assert_eq!(s.cycle(), 1);
        assert!(!s.reached_target());
    }

    #[test]
    fn losing_streak_follows_fibonacci_bets() {
        let mut s = BettingSession::new(dec!(1000), dec!(1), None, dec!(50));
        let mut bets = Vec::new();
        for expected_index in 1..=4 {
            assert_eq!(s.place_bet(false), expected_index);
            bets.push(s.current_bet());
        }
        assert_eq!(bets, vec![dec!(1), dec!(1), dec!(2), dec!(3)]);
        assert_eq!(s.balance(), dec!(993));
        assert_eq!(s.progression_index(), 5);
        assert_eq!(s.largest_progression_index(), 4);
    }

    #[test]
    fn win_returns_index_used_before_reset() {
        let mut s = BettingSession::new(dec!(1000), dec!(1), None, dec!(500));
        s.place_bet(false);
        s.place_bet(false);
        assert_eq!(s.place_bet(true), 3);
        assert_eq!(s.current_bet(), dec!(2));
        assert_eq!(s.progression_index(), 1);
        assert_eq!(s.largest_progression_index(), 3);
    }

    #[test]
    fn wager_is_capped_by_balance() {
        let mut s = session(dec!(5), dec!(10), None);
        s.place_bet(false);
        assert_eq!(s.current_bet(), dec!(5));
        assert_eq!(s.balance(), Decimal::ZERO);
        assert_eq!(s.stop_reason(), Some(StopReason::Bankrupt));
    }

    #[test]
    fn wager_is_capped_by_max_bet_after_balance() {
        let mut s = BettingSession::new(dec!(1000), dec!(10), Some(dec!(25)), dec!(500));
        for _ in 0..5 {
            s.place_bet(false);
            assert!(s.current_bet() <= dec!(25));
        }
        // F(5) = 5, so the raw wager would have been 50.
        assert_eq!(s.current_bet(), dec!(25));

        let mut poor = BettingSession::new(dec!(8), dec!(10), Some(dec!(25)), dec!(500));
        assert_eq!(poor.wager_for(1), dec!(8));
    }

    #[test]
    fn zero_max_bet_is_uncapped() {
        let mut s = BettingSession::new(dec!(1000), dec!(10), Some(Decimal::ZERO), dec!(500));
        assert_eq!(s.max_bet(), None);
        assert_eq!(s.wager_for(6), dec!(80));
    }

    #[test]
    fn counters_stay_consistent() {
        let mut s = BettingSession::new(dec!(10_000), dec!(2), None, dec!(100_000));
        let pattern = [false, false, true, false, true, true, false, false, false, true];
        let mut last_high = s.largest_progression_index();
        for won in pattern {
            let before_index = s.progression_index();
            let before_balance = s.balance();
            s.place_bet(won);
            assert_eq!(s.spin_count(), s.win_count() + s.loss_count());
            assert!(s.progression_index() >= 1);
            assert!(s.current_bet() <= before_balance);
            if won {
                assert_eq!(s.progression_index(), 1);
            } else {
                assert_eq!(s.progression_index(), before_index + 1);
            }
            assert!(s.largest_progression_index() >= last_high);
            last_high = s.largest_progression_index();
        }
        assert_eq!(s.cycle(), 5);
    }

    #[test]
    fn zero_target_stops_on_any_non_negative_profit() {
        let mut s = BettingSession::new(dec!(100), dec!(10), None, Decimal::ZERO);
        s.place_bet(false);
        assert!(!s.reached_target());
        s.place_bet(true);
        // lost 10, then bet 10 and won 30: profit +10
        assert_eq!(s.profit(), dec!(10));
        assert_eq!(s.stop_reason(), Some(StopReason::TargetReached));
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::TargetReached.to_string(), "target_reached");
        assert_eq!(StopReason::Bankrupt.to_string(), "bankrupt");
        assert_eq!(StopReason::SpinLimit.to_string(), "spin_limit");
    }
}
