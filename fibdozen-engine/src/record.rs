//! Per-spin log entries.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of one resolved spin, appended to the run log in spin order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub spin: u64,
    pub balance_pre_spin: Decimal,
    /// Cycle the spin belonged to (before a win closes it)
    pub cycle: u32,
    pub progression_index: u32,
    pub multiplier: u128,
    pub bet: Decimal,
    pub number: u8,
    pub won: bool,
    /// Gross return on a win, zero on a loss
    pub winnings: Decimal,
    pub balance_post_spin: Decimal,
    pub profit: Decimal,
    pub profit_pct: Decimal,
    pub wins: u64,
    pub losses: u64,
    pub win_pct: Decimal,
    pub loss_pct: Decimal,
}

impl SpinRecord {
    /// `"Won"` or `"Lost"`, as shown in reports.
    #[must_use]
    pub const fn result_label(&self) -> &'static str {
        if self.won { "Won" } else { "Lost" }
    }
}
