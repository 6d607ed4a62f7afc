use fibdozen_engine::StopReason;
use fibdozen_engine::numbers::{decimal_to_f64, u64_to_f64};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::runner::RunOutcome;

/// Statistics across every run of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAggregate {
    pub iterations: usize,
    pub mean_net_result: f64,
    pub std_net_result: f64,
    pub best_net_result: Decimal,
    pub worst_net_result: Decimal,
    pub mean_spins: f64,
    pub std_spins: f64,
    pub target_reached_pct: f64,
    pub bankrupt_pct: f64,
    pub spin_limit_pct: f64,
    pub largest_bet: Decimal,
    pub largest_progression_index: u32,
}

pub fn aggregate_runs(outcomes: &[RunOutcome]) -> BatchAggregate {
    let mut builder = AggregateBuilder::default();
    for outcome in outcomes {
        builder.ingest(outcome);
    }
    builder.finish()
}

#[derive(Debug, Clone, Default)]
struct AggregateBuilder {
    stats_net: RunningStats,
    stats_spins: RunningStats,
    iterations: usize,
    target_reached: u64,
    bankrupt: u64,
    spin_limit: u64,
    best_net: Option<Decimal>,
    worst_net: Option<Decimal>,
    largest_bet: Decimal,
    largest_progression_index: u32,
}

impl AggregateBuilder {
    fn ingest(&mut self, outcome: &RunOutcome) {
        let summary = &outcome.summary;
        self.iterations += 1;
        self.stats_net.add(decimal_to_f64(summary.net_result));
        self.stats_spins.add(u64_to_f64(summary.total_spins));
        match summary.stop_reason {
            StopReason::TargetReached => self.target_reached += 1,
            StopReason::Bankrupt => self.bankrupt += 1,
            StopReason::SpinLimit => self.spin_limit += 1,
        }
        self.best_net = Some(
            self.best_net
                .map_or(summary.net_result, |best| best.max(summary.net_result)),
        );
        self.worst_net = Some(
            self.worst_net
                .map_or(summary.net_result, |worst| worst.min(summary.net_result)),
        );
        self.largest_bet = self.largest_bet.max(summary.largest_bet);
        self.largest_progression_index = self
            .largest_progression_index
            .max(summary.largest_progression_index);
    }

    fn finish(self) -> BatchAggregate {
        let denom = u64_to_f64(u64::try_from(self.iterations.max(1)).unwrap_or(u64::MAX));
        BatchAggregate {
            iterations: self.iterations,
            mean_net_result: self.stats_net.mean(),
            std_net_result: self.stats_net.std_dev(),
            best_net_result: self.best_net.unwrap_or(Decimal::ZERO),
            worst_net_result: self.worst_net.unwrap_or(Decimal::ZERO),
            mean_spins: self.stats_spins.mean(),
            std_spins: self.stats_spins.std_dev(),
            target_reached_pct: u64_to_f64(self.target_reached) * 100.0 / denom,
            bankrupt_pct: u64_to_f64(self.bankrupt) * 100.0 / denom,
            spin_limit_pct: u64_to_f64(self.spin_limit) * 100.0 / denom,
            largest_bet: self.largest_bet,
            largest_progression_index: self.largest_progression_index,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let count = u64_to_f64(self.count);
        let delta = value - self.mean;
        self.mean += delta / count;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / u64_to_f64(self.count - 1)
        } else {
            0.0
        }
    }

    fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}
