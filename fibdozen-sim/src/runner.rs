use anyhow::{Context, Result};
use colored::Colorize;
use fibdozen_engine::{RunSummary, SimulationConfig, SimulationRun, derive_run_seed, run_seeded};
use std::time::{Duration, Instant};

/// One finished simulation along with the seed that reproduces it.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Seed the wheel was built from
    pub seed: u64,
    /// Seed the batch entry was derived from
    pub base_seed: u64,
    pub iteration: u64,
    pub run: SimulationRun,
    pub summary: RunSummary,
    pub duration: Duration,
}

impl RunOutcome {
    /// Short label used in report headings, e.g. `seed 42 #2`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.iteration == 0 {
            format!("seed {}", self.base_seed)
        } else {
            format!("seed {} #{}", self.base_seed, self.iteration + 1)
        }
    }
}

/// Drives one or more independent runs over a list of seeds.
pub struct BatchRunner {
    verbose: bool,
}

impl BatchRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run `iterations` simulations per base seed, sequentially.
    pub fn run(
        &self,
        config: &SimulationConfig,
        seeds: &[u64],
        iterations: u64,
    ) -> Result<Vec<RunOutcome>> {
        let mut outcomes = Vec::new();

        for &base_seed in seeds {
            for iteration in 0..iterations {
                let seed = derive_run_seed(base_seed, iteration);
                let start_time = Instant::now();
                let run = run_seeded(config, seed)
                    .with_context(|| format!("simulation failed for seed {base_seed}"))?;
                let duration = start_time.elapsed();
                let summary = run.summary();

                log::info!(
                    "seed {base_seed} iteration {iteration}: {} after {} spins, net {}",
                    summary.stop_reason,
                    summary.total_spins,
                    summary.net_result
                );

                if self.verbose {
                    eprintln!(
                        "  🎲 Run {}/{} seed {} -> {} ({} spins, net {}) in {duration:?}",
                        iteration + 1,
                        iterations,
                        base_seed.to_string().bright_white(),
                        summary.stop_reason,
                        summary.total_spins,
                        summary.net_result
                    );
                }

                outcomes.push(RunOutcome {
                    seed,
                    base_seed,
                    iteration,
                    run,
                    summary,
                    duration,
                });
            }
        }

        Ok(outcomes)
    }
}
