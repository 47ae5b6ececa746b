//! Bank Survival Simulator Core - Rust Engine
//!
//! Discrete-time balance-sheet liquidation simulator. Given an opening
//! balance sheet, a sequence of deposit withdrawals, forced-sale haircuts
//! and a liquidation order, the engine rolls the books forward period by
//! period and reports the first period at which the bank breaches its
//! survival condition.
//!
//! # Architecture
//!
//! - **models**: Balance-sheet books, haircuts, snapshots, events
//! - **liquidation**: Priority waterfall and cash-floor replenishment
//! - **survival**: Equity/LCR/NSFR metrics and breach policies
//! - **orchestrator**: Period loop, configuration, result audits
//! - **scenario**: Withdrawal input parsing (text list, CSV)
//! - **report**: Roll-forward table, narratives, chart series
//!
//! # Critical Invariants
//!
//! 1. Asset quantities never go negative
//! 2. Equity is always derived (assets − liabilities), never stored independently
//! 3. The opening books are never mutated; each run owns a working copy
//! 4. The run stops at the first breach

// Module declarations
pub mod liquidation;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod scenario;
pub mod survival;

// Re-exports for convenience
pub use liquidation::{liquidate, replenish_cash_floor, AssetSale, LiquidationOutcome, LiquidationPass};
pub use models::{
    books::{equity, total_assets, total_liabilities, AssetBook, LiabilityBook},
    category::{AssetCategory, LiabilityCategory},
    event::{Event, EventLog},
    haircut::{HaircutError, HaircutTable},
    snapshot::{PeriodSnapshot, SimulationResult},
};
pub use orchestrator::{
    run_simulation, validate_result, ConfigError, Simulation, SimulationConfig, SimulationError,
};
pub use report::{BalanceSheetTable, PeriodNarrative, SurvivalIndicator};
pub use scenario::ScenarioError;
pub use survival::{BreachPolicy, BreachReason, PeriodMetrics, SurvivalEvaluator};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn bank_survival_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::simulation::run_simulation, m)?)?;
    Ok(())
}
