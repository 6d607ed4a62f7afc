//! Fibonacci Dozens Engine
//!
//! Platform-agnostic core for simulating a Fibonacci betting progression on
//! the third dozen of a single-zero roulette wheel. This crate owns the
//! progression state machine and the simulation loop; rendering and input
//! handling belong to the caller.

pub mod config;
pub mod constants;
pub mod fibonacci;
pub mod numbers;
pub mod record;
pub mod result;
pub mod seed;
pub mod session;
pub mod simulation;
pub mod wheel;

// Re-export commonly used types
pub use config::{ConfigError, SimulationConfig};
pub use fibonacci::FibonacciTable;
pub use record::SpinRecord;
pub use result::{RunSummary, streak_odds, summarize};
pub use seed::derive_run_seed;
pub use session::{BettingSession, StopReason};
pub use simulation::{SimulationRun, run_simulation};
pub use wheel::{ScriptedWheel, SpinOutcome, SpinSource, Wheel};

/// Run a seeded simulation with the default pseudorandom wheel.
///
/// # Errors
///
/// Returns an error if the configuration fails validation.
pub fn run_seeded(config: &SimulationConfig, seed: u64) -> Result<SimulationRun, ConfigError> {
    let mut wheel = Wheel::from_seed(seed);
    run_simulation(config, &mut wheel)
}
