//! Per-period snapshots and the simulation result
//!
//! Snapshots are created once per period by the engine and never mutated
//! afterwards. Period 0 is the opening book with no withdrawal applied.

use crate::liquidation::AssetSale;
use crate::models::books::{AssetBook, LiabilityBook};
use crate::models::category::AssetCategory;
use crate::models::event::EventLog;
use crate::survival::{BreachPolicy, BreachReason};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of one simulated period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    /// 0 for the opening snapshot, then 1, 2, ...
    pub period: usize,
    /// Deposit withdrawal applied this period
    pub withdrawal: f64,
    pub opening_assets: AssetBook,
    pub opening_liabilities: LiabilityBook,
    pub closing_assets: AssetBook,
    pub closing_liabilities: LiabilityBook,
    /// Closing total assets − closing total liabilities
    pub equity: f64,
    /// Haircut loss realized this period (both passes)
    pub realized_loss: f64,
    /// Haircut loss realized since the opening book
    pub cumulative_loss: f64,
    pub lcr: f64,
    pub nsfr: f64,
    /// Part of the withdrawal the listed assets could not fund
    pub remaining_need: f64,
    /// Cash-floor gap left after the replenishment pass (0 without a floor)
    pub floor_gap: f64,
    /// Sales executed this period, in execution order
    pub sales: Vec<AssetSale>,
}

impl PeriodSnapshot {
    /// Opening snapshot: books unchanged, nothing sold
    pub(crate) fn opening(
        assets: AssetBook,
        liabilities: LiabilityBook,
        equity: f64,
        lcr: f64,
        nsfr: f64,
    ) -> Self {
        Self {
            period: 0,
            withdrawal: 0.0,
            opening_assets: assets,
            opening_liabilities: liabilities,
            closing_assets: assets,
            closing_liabilities: liabilities,
            equity,
            realized_loss: 0.0,
            cumulative_loss: 0.0,
            lcr,
            nsfr,
            remaining_need: 0.0,
            floor_gap: 0.0,
            sales: Vec::new(),
        }
    }

    pub fn is_opening(&self) -> bool {
        self.period == 0
    }

    pub fn total_assets(&self) -> f64 {
        self.closing_assets.total()
    }

    pub fn total_liabilities(&self) -> f64 {
        self.closing_liabilities.total()
    }

    /// assets − (liabilities + equity); zero up to rounding by construction
    pub fn balance_check(&self) -> f64 {
        self.total_assets() - (self.total_liabilities() + self.equity)
    }

    /// Cash actually delivered to depositors this period
    pub fn cash_paid_out(&self) -> f64 {
        self.withdrawal - self.remaining_need
    }

    /// Opening minus closing quantity of a category (negative if it grew)
    pub fn asset_decrease(&self, category: AssetCategory) -> f64 {
        self.opening_assets.get(category) - self.closing_assets.get(category)
    }

    /// Categories whose balance fell this period, with the decrease
    pub fn liquidated_categories(&self) -> Vec<(AssetCategory, f64)> {
        AssetCategory::ALL
            .iter()
            .map(|c| (*c, self.asset_decrease(*c)))
            .filter(|(_, decrease)| *decrease > 0.0)
            .collect()
    }
}

/// Outcome of one simulation run
///
/// Constructed fresh per run and handed to the caller; the engine keeps no
/// reference to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    run_id: Uuid,
    config_hash: String,
    breach_policy: BreachPolicy,
    snapshots: Vec<PeriodSnapshot>,
    survival_period: Option<usize>,
    breach_reasons: Vec<BreachReason>,
    events: EventLog,
}

impl SimulationResult {
    pub(crate) fn new(
        config_hash: String,
        breach_policy: BreachPolicy,
        snapshots: Vec<PeriodSnapshot>,
        survival_period: Option<usize>,
        breach_reasons: Vec<BreachReason>,
        events: EventLog,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            config_hash,
            breach_policy,
            snapshots,
            survival_period,
            breach_reasons,
            events,
        }
    }

    /// Unique identifier of this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Fingerprint of the configuration that produced this result
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    pub fn breach_policy(&self) -> BreachPolicy {
        self.breach_policy
    }

    /// Snapshots in period order, starting with the opening snapshot
    pub fn snapshots(&self) -> &[PeriodSnapshot] {
        &self.snapshots
    }

    /// Opening (period 0) snapshot
    pub fn opening(&self) -> Option<&PeriodSnapshot> {
        self.snapshots.first()
    }

    /// Last recorded snapshot (the breach period if the run was truncated)
    pub fn last(&self) -> Option<&PeriodSnapshot> {
        self.snapshots.last()
    }

    /// Number of withdrawal periods actually simulated
    pub fn periods_simulated(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// First breached period, `None` if the bank survived every period
    pub fn survival_period(&self) -> Option<usize> {
        self.survival_period
    }

    pub fn survived(&self) -> bool {
        self.survival_period.is_none()
    }

    pub fn breach_reasons(&self) -> &[BreachReason] {
        &self.breach_reasons
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Total haircut loss over the simulated periods
    pub fn total_realized_loss(&self) -> f64 {
        self.last().map(|s| s.cumulative_loss).unwrap_or(0.0)
    }
}
