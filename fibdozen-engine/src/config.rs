//! Run parameters and their boundary validation.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a set of run parameters is rejected before a session is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("starting balance must be positive, got {0}")]
    NonPositiveBalance(Decimal),
    #[error("unit bet must be positive, got {0}")]
    NonPositiveUnitBet(Decimal),
    #[error("maximum bet cannot be negative, got {0}")]
    NegativeMaxBet(Decimal),
    #[error("target profit cannot be negative, got {0}")]
    NegativeTargetProfit(Decimal),
    #[error("maximum spins must be at least 1 when set")]
    ZeroSpinLimit,
    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub start_balance: Decimal,
    pub unit_bet: Decimal,
    /// Ceiling on a single wager; `None` or zero means uncapped.
    pub max_bet: Option<Decimal>,
    pub target_profit: Decimal,
    /// Spin cap; `None` runs until the target is reached or the bankroll is gone.
    pub max_spins: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_balance: Decimal::new(1500, 0),
            unit_bet: Decimal::new(5, 0),
            max_bet: None,
            target_profit: Decimal::new(100, 0),
            max_spins: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new(start_balance: Decimal, unit_bet: Decimal, target_profit: Decimal) -> Self {
        Self {
            start_balance,
            unit_bet,
            max_bet: None,
            target_profit,
            max_spins: None,
        }
    }

    #[must_use]
    pub fn with_max_bet(mut self, max_bet: Option<Decimal>) -> Self {
        self.max_bet = max_bet;
        self
    }

    #[must_use]
    pub fn with_max_spins(mut self, max_spins: Option<u64>) -> Self {
        self.max_spins = max_spins;
        self
    }

    /// Effective wager cap, treating zero as "no cap".
    #[must_use]
    pub fn bet_cap(&self) -> Option<Decimal> {
        self.max_bet.filter(|cap| *cap > Decimal::ZERO)
    }

    /// Check every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_balance <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBalance(self.start_balance));
        }
        if self.unit_bet <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveUnitBet(self.unit_bet));
        }
        if let Some(max_bet) = self.max_bet
            && max_bet < Decimal::ZERO
        {
            return Err(ConfigError::NegativeMaxBet(max_bet));
        }
        if self.target_profit < Decimal::ZERO {
            return Err(ConfigError::NegativeTargetProfit(self.target_profit));
        }
        if self.max_spins == Some(0) {
            return Err(ConfigError::ZeroSpinLimit);
        }
        Ok(())
    }

    /// Parse a JSON document and validate it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
