//! Reporting views over a simulation result
//!
//! Everything here is derived from immutable snapshots; nothing reads the
//! live working books.
//!
//! - [`BalanceSheetTable`]: fixed-order roll-forward table with a balance-check row
//! - [`PeriodNarrative`]: per-period textual explanation
//! - [`series`]: ratio, equity and asset-depletion series for charts
//! - [`SurvivalIndicator`]: breach/survival headline

pub mod narrative;
pub mod series;
pub mod table;

pub use narrative::{narratives, PeriodNarrative};
pub use series::{asset_depletion, equity_path, ratio_series, RatioPoint};
pub use table::{BalanceSheetTable, TableRow};

use crate::models::snapshot::SimulationResult;
use crate::survival::BreachReason;
use serde::Serialize;
use std::fmt;

/// Headline outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SurvivalIndicator {
    Survived {
        periods: usize,
    },
    Breached {
        period: usize,
        reasons: Vec<BreachReason>,
    },
}

impl SurvivalIndicator {
    pub fn from_result(result: &SimulationResult) -> Self {
        match result.survival_period() {
            Some(period) => SurvivalIndicator::Breached {
                period,
                reasons: result.breach_reasons().to_vec(),
            },
            None => SurvivalIndicator::Survived {
                periods: result.periods_simulated(),
            },
        }
    }

    pub fn is_breach(&self) -> bool {
        matches!(self, SurvivalIndicator::Breached { .. })
    }
}

impl fmt::Display for SurvivalIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurvivalIndicator::Survived { .. } => write!(f, "Bank survives all periods"),
            SurvivalIndicator::Breached { period, reasons } => {
                write!(f, "Survival horizon = {} periods", period)?;
                if !reasons.is_empty() {
                    let text: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
                    write!(f, " ({})", text.join("; "))?;
                }
                Ok(())
            }
        }
    }
}
