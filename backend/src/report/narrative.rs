//! Per-period narrative
//!
//! Each narrative compares a period's snapshot with the previous one.
//! The equity change is the exact difference between the two closing
//! equities.

use crate::models::category::AssetCategory;
use crate::models::snapshot::{PeriodSnapshot, SimulationResult};
use crate::survival::FUNDING_TOLERANCE;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodNarrative {
    pub period: usize,
    pub withdrawal: f64,
    /// Categories whose balance fell this period, with the decrease
    pub liquidated: Vec<(AssetCategory, f64)>,
    pub closing_cash: f64,
    pub min_cash: Option<f64>,
    pub unfunded_withdrawal: f64,
    pub closing_equity: f64,
    /// current equity − previous equity
    pub equity_change: f64,
    pub balance_check: f64,
}

impl PeriodNarrative {
    pub fn build(previous: &PeriodSnapshot, current: &PeriodSnapshot, min_cash: Option<f64>) -> Self {
        Self {
            period: current.period,
            withdrawal: current.withdrawal,
            liquidated: current.liquidated_categories(),
            closing_cash: current.closing_assets.cash,
            min_cash,
            unfunded_withdrawal: current.remaining_need,
            closing_equity: current.equity,
            equity_change: current.equity - previous.equity,
            balance_check: current.balance_check(),
        }
    }

    /// True if a floor is configured and closing cash meets it
    pub fn floor_met(&self) -> Option<bool> {
        self.min_cash
            .map(|floor| self.closing_cash >= floor - FUNDING_TOLERANCE)
    }
}

/// Narratives for every simulated period of a run
pub fn narratives(result: &SimulationResult, min_cash: Option<f64>) -> Vec<PeriodNarrative> {
    result
        .snapshots()
        .windows(2)
        .map(|pair| PeriodNarrative::build(&pair[0], &pair[1], min_cash))
        .collect()
}

impl fmt::Display for PeriodNarrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Period {}", self.period)?;
        writeln!(f, "  Withdrawal: {:.2}", self.withdrawal)?;

        if self.liquidated.is_empty() {
            writeln!(f, "  Assets liquidated: none")?;
        } else {
            let sold: Vec<String> = self
                .liquidated
                .iter()
                .map(|(category, amount)| format!("{} {:.2}", category, amount))
                .collect();
            writeln!(f, "  Assets liquidated: {}", sold.join(", "))?;
        }

        match self.min_cash {
            Some(floor) => {
                let status = if self.floor_met() == Some(true) {
                    "met"
                } else {
                    "BELOW FLOOR"
                };
                writeln!(
                    f,
                    "  Closing cash: {:.2} vs floor {:.2} ({})",
                    self.closing_cash, floor, status
                )?;
            }
            None => writeln!(f, "  Closing cash: {:.2}", self.closing_cash)?,
        }

        if self.unfunded_withdrawal > 0.0 {
            writeln!(f, "  Unfunded withdrawal: {:.2}", self.unfunded_withdrawal)?;
        }

        writeln!(
            f,
            "  Closing equity: {:.2} (change {:+.2})",
            self.closing_equity, self.equity_change
        )?;
        write!(f, "  Balance check: {:.6}", self.balance_check)
    }
}
