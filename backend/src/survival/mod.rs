//! Survival Evaluator
//!
//! After each period's liquidation the evaluator computes equity and the
//! simplified liquidity ratios, then checks the active breach policy.
//!
//! # Breach Policies
//!
//! 1. **RatioThreshold**: equity ≤ 0, LCR < 1, or total assets ≤ 0
//! 2. **FundingFeasibility**: the withdrawal could not be funded, or the
//!    cash floor could not be restored because every other listed asset
//!    is exhausted
//!
//! The evaluator is a two-state machine (`Running` → `Breached`). The
//! breached state is terminal; the first breach fixes the survival period.
//!
//! The LCR/NSFR formulas are single-factor approximations and are not
//! regulation-compliant calculations.

pub mod evaluator;
pub mod metrics;

pub use evaluator::{BreachPolicy, BreachReason, PeriodCheck, SurvivalEvaluator, SurvivalState};
pub use metrics::{liquidity_coverage_ratio, net_stable_funding_ratio, PeriodMetrics};

/// Amounts at or below this are treated as zero when testing funding gaps
pub const FUNDING_TOLERANCE: f64 = 1e-9;
