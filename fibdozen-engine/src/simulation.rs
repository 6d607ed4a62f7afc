//! Simulation driver: spins, resolves, and logs until the run stops.
use log::{debug, trace};
use rust_decimal::Decimal;

use crate::config::{ConfigError, SimulationConfig};
use crate::numbers::{change_pct, count_pct};
use crate::record::SpinRecord;
use crate::result::{RunSummary, summarize};
use crate::session::{BettingSession, StopReason};
use crate::wheel::SpinSource;

/// Completed run: the log, the final session, and why it stopped.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    config: SimulationConfig,
    records: Vec<SpinRecord>,
    session: BettingSession,
    stop_reason: StopReason,
}

impl SimulationRun {
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn records(&self) -> &[SpinRecord] {
        &self.records
    }

    #[must_use]
    pub fn session(&self) -> &BettingSession {
        &self.session
    }

    #[must_use]
    pub const fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Aggregate statistics for this run.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        summarize(&self.session, &self.records, self.stop_reason)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<SpinRecord>, BettingSession, StopReason) {
        (self.records, self.session, self.stop_reason)
    }
}

/// Run one progression to completion.
///
/// The stopping predicate is checked only after a bet is resolved, so every
/// run records at least one spin.
///
/// # Errors
///
/// Returns an error if `config` fails validation.
pub fn run_simulation(
    config: &SimulationConfig,
    source: &mut dyn SpinSource,
) -> Result<SimulationRun, ConfigError> {
    config.validate()?;
    let mut session = BettingSession::from_config(config);
    let mut records = Vec::new();

    debug!(
        "starting run: balance={} unit={} max_bet={:?} target={} max_spins={:?}",
        config.start_balance,
        config.unit_bet,
        config.bet_cap(),
        config.target_profit,
        config.max_spins
    );

    loop {
        records.push(play_spin(&mut session, source));

        if session.reached_target() {
            break;
        }
        if config
            .max_spins
            .is_some_and(|limit| session.spin_count() >= limit)
        {
            break;
        }
    }

    let stop_reason = session.stop_reason().unwrap_or(StopReason::SpinLimit);
    debug!(
        "run finished: reason={stop_reason} spins={} balance={}",
        session.spin_count(),
        session.balance()
    );

    Ok(SimulationRun {
        config: config.clone(),
        records,
        session,
        stop_reason,
    })
}

fn play_spin(session: &mut BettingSession, source: &mut dyn SpinSource) -> SpinRecord {
    let balance_pre_spin = session.balance();
    let cycle = session.cycle();
    let outcome = source.spin();

    let progression_index = session.place_bet(outcome.won);
    let multiplier = session.multiplier(progression_index);
    let bet = session.current_bet();
    let balance_post_spin = session.balance();
    let spins = session.spin_count();

    let winnings = if outcome.won {
        balance_post_spin - (balance_pre_spin - bet)
    } else {
        Decimal::ZERO
    };

    trace!(
        "spin {spins}: number={} won={} index={progression_index} bet={bet} balance={balance_post_spin}",
        outcome.number, outcome.won
    );

    SpinRecord {
        spin: spins,
        balance_pre_spin,
        cycle,
        progression_index,
        multiplier,
        bet,
        number: outcome.number,
        won: outcome.won,
        winnings,
        balance_post_spin,
        profit: session.profit(),
        profit_pct: change_pct(balance_post_spin, session.start_balance()),
        wins: session.win_count(),
        losses: session.loss_count(),
        win_pct: count_pct(session.win_count(), spins),
        loss_pct: count_pct(session.loss_count(), spins),
    }
}
