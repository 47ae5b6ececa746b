//! Simulation Engine
//!
//! Rolls an owned working copy of the balance sheet forward over the
//! withdrawal sequence, one period at a time.
//!
//! # Architecture
//!
//! ```text
//! For each period t (1-based):
//! 1. Withdraw deposits (liability run-off)
//! 2. Liquidate assets in priority order to fund the withdrawal
//! 3. Optionally liquidate non-cash assets to restore the cash floor
//! 4. Compute equity, LCR, NSFR
//! 5. Evaluate the breach policy
//! 6. Record an immutable snapshot
//! 7. Stop at the first breach, otherwise continue
//! ```
//!
//! The opening books inside [`SimulationConfig`] are never mutated; every
//! run starts from a fresh copy, so two runs with identical configuration
//! produce identical snapshot sequences.
//!
//! # Example
//!
//! ```rust
//! use bank_survival_core_rs::orchestrator::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     withdrawals: vec![50.0, 80.0],
//!     ..SimulationConfig::default()
//! };
//!
//! let result = run_simulation(&config).unwrap();
//! assert_eq!(result.snapshots().len(), 3);
//! assert!(result.survived());
//! ```

use crate::liquidation::{liquidate, replenish_cash_floor, LiquidationOutcome};
use crate::models::books::{AssetBook, LiabilityBook};
use crate::models::category::{AssetCategory, LiabilityCategory};
use crate::models::event::{Event, EventLog};
use crate::models::haircut::{HaircutError, HaircutTable};
use crate::models::snapshot::{PeriodSnapshot, SimulationResult};
use crate::orchestrator::checkpoint::compute_config_hash;
use crate::scenario::ScenarioError;
use crate::survival::{
    BreachPolicy, PeriodCheck, PeriodMetrics, SurvivalEvaluator, SurvivalState, FUNDING_TOLERANCE,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Immutable input to a run. Fields missing from a serialized config take
/// the reference defaults (see [`SimulationConfig::default`]).
///
/// # Fields
///
/// * `opening_assets` - Cash, HQLA, Loans, RealEstate at period 0
/// * `opening_liabilities` - Deposits and Wholesale at period 0
/// * `haircuts` - Forced-sale haircuts (Cash fixed at 0)
/// * `priority` - Liquidation order; unlisted categories are never sold
/// * `withdrawals` - One deposit shock per period
/// * `min_cash` - Optional cash floor restored after each withdrawal
/// * `breach_policy` - Survival definition in force
/// * `halt_on_unfunded_withdrawal` - Ratio policy also breaches on unfunded withdrawals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub opening_assets: AssetBook,
    pub opening_liabilities: LiabilityBook,
    pub haircuts: HaircutTable,
    pub priority: Vec<AssetCategory>,
    pub withdrawals: Vec<f64>,
    pub min_cash: Option<f64>,
    pub breach_policy: BreachPolicy,
    pub halt_on_unfunded_withdrawal: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            opening_assets: AssetBook::new(100.0, 200.0, 400.0, 200.0),
            opening_liabilities: LiabilityBook::new(600.0, 150.0),
            haircuts: HaircutTable::default(),
            priority: AssetCategory::ALL.to_vec(),
            withdrawals: vec![50.0, 80.0, 120.0],
            min_cash: None,
            breach_policy: BreachPolicy::RatioThreshold,
            halt_on_unfunded_withdrawal: false,
        }
    }
}

/// Configuration validation failures
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Opening {category} must be a finite non-negative amount, got {value}")]
    InvalidAsset { category: AssetCategory, value: f64 },

    #[error("Opening {category} must be a finite non-negative amount, got {value}")]
    InvalidLiability {
        category: LiabilityCategory,
        value: f64,
    },

    #[error(transparent)]
    Haircut(#[from] HaircutError),

    #[error("{0} appears more than once in the liquidation priority")]
    DuplicatePriority(AssetCategory),

    #[error("Withdrawal for period {period} must be a finite non-negative amount, got {value}")]
    InvalidWithdrawal { period: usize, value: f64 },

    #[error("Minimum cash must be a finite non-negative amount, got {0}")]
    InvalidMinCash(f64),
}

fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl SimulationConfig {
    /// Check every input before a simulation is allowed to start
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (category, value) in self.opening_assets.iter() {
            if !is_valid_amount(value) {
                return Err(ConfigError::InvalidAsset { category, value });
            }
        }

        for (category, value) in self.opening_liabilities.iter() {
            if !is_valid_amount(value) {
                return Err(ConfigError::InvalidLiability { category, value });
            }
        }

        self.haircuts.validate()?;

        let mut seen = Vec::with_capacity(self.priority.len());
        for category in &self.priority {
            if seen.contains(category) {
                return Err(ConfigError::DuplicatePriority(*category));
            }
            seen.push(*category);
        }

        for (index, value) in self.withdrawals.iter().enumerate() {
            if !is_valid_amount(*value) {
                return Err(ConfigError::InvalidWithdrawal {
                    period: index + 1,
                    value: *value,
                });
            }
        }

        if let Some(min_cash) = self.min_cash {
            if !is_valid_amount(min_cash) {
                return Err(ConfigError::InvalidMinCash(min_cash));
            }
        }

        Ok(())
    }

    /// True if the category may be sold
    pub fn is_liquidatable(&self, category: AssetCategory) -> bool {
        self.priority.contains(&category)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation errors
///
/// Funding shortfalls and survival breaches are not errors; they are
/// reported on the result.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State validation error: {0}")]
    StateValidationError(String),
}

// ============================================================================
// Simulation
// ============================================================================

/// A single simulation run
///
/// Owns its working books. Construct with [`Simulation::new`], advance
/// with [`Simulation::step`] or drive to completion with
/// [`Simulation::run`].
#[derive(Debug)]
pub struct Simulation {
    /// Immutable inputs
    config: SimulationConfig,

    /// Fingerprint of `config`
    config_hash: String,

    /// Working copy of the asset book
    assets: AssetBook,

    /// Working copy of the liability book
    liabilities: LiabilityBook,

    evaluator: SurvivalEvaluator,

    /// History, starting with the opening snapshot
    snapshots: Vec<PeriodSnapshot>,

    event_log: EventLog,

    cumulative_loss: f64,

    /// Index of the next withdrawal to apply
    next_index: usize,
}

impl Simulation {
    /// Validate the configuration and record the opening snapshot
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if any input is malformed;
    /// no simulation state is created in that case.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        for category in config.haircuts.beyond_reference_ranges() {
            warn!(
                "{} haircut {} exceeds the reference maximum {}",
                category,
                config.haircuts.get(category),
                HaircutTable::reference_max(category)
            );
        }

        let config_hash = compute_config_hash(&config)?;
        let assets = config.opening_assets;
        let liabilities = config.opening_liabilities;

        let metrics = PeriodMetrics::compute(&assets, &liabilities, &config.haircuts, 0.0);
        let opening = PeriodSnapshot::opening(
            assets,
            liabilities,
            metrics.equity,
            metrics.lcr,
            metrics.nsfr,
        );

        info!(
            "Starting simulation {}: {} periods, policy {:?}, floor {:?}",
            &config_hash[..12],
            config.withdrawals.len(),
            config.breach_policy,
            config.min_cash
        );

        Ok(Self {
            evaluator: SurvivalEvaluator::new(
                config.breach_policy,
                config.halt_on_unfunded_withdrawal,
            ),
            config_hash,
            assets,
            liabilities,
            snapshots: vec![opening],
            event_log: EventLog::new(),
            cumulative_loss: 0.0,
            next_index: 0,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current working asset book
    pub fn assets(&self) -> &AssetBook {
        &self.assets
    }

    /// Current working liability book
    pub fn liabilities(&self) -> &LiabilityBook {
        &self.liabilities
    }

    /// Last completed period (0 before the first step)
    pub fn current_period(&self) -> usize {
        self.next_index
    }

    pub fn survival_state(&self) -> &SurvivalState {
        self.evaluator.state()
    }

    pub fn snapshots(&self) -> &[PeriodSnapshot] {
        &self.snapshots
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// True once the withdrawals are exhausted or a breach occurred
    pub fn is_finished(&self) -> bool {
        self.evaluator.is_breached() || self.next_index >= self.config.withdrawals.len()
    }

    /// Simulate the next period
    ///
    /// Returns the new snapshot, or `None` if the run is already finished.
    pub fn step(&mut self) -> Option<&PeriodSnapshot> {
        if self.is_finished() {
            return None;
        }

        let period = self.next_index + 1;
        let withdrawal = self.config.withdrawals[self.next_index];
        let opening_assets = self.assets;
        let opening_liabilities = self.liabilities;

        // 1. Deposit run-off
        self.liabilities.withdraw_deposits(withdrawal);
        self.event_log.log(Event::DepositsWithdrawn {
            period,
            amount: withdrawal,
            deposits_after: self.liabilities.deposits,
        });

        // 2. Withdrawal pass
        let withdrawal_pass = liquidate(
            &mut self.assets,
            withdrawal,
            &self.config.haircuts,
            &self.config.priority,
        );
        self.log_sales(period, &withdrawal_pass);
        if withdrawal_pass.has_shortfall() {
            warn!(
                "Period {}: listed assets exhausted with {:.4} of the withdrawal unfunded",
                period, withdrawal_pass.remaining_need
            );
            self.event_log.log(Event::WithdrawalShortfall {
                period,
                remaining_need: withdrawal_pass.remaining_need,
            });
        }

        // 3. Cash-floor pass
        let floor_pass = match self.config.min_cash {
            Some(min_cash) => {
                let outcome = replenish_cash_floor(
                    &mut self.assets,
                    min_cash,
                    &self.config.haircuts,
                    &self.config.priority,
                );
                self.log_sales(period, &outcome);
                if !outcome.sales.is_empty() {
                    self.event_log.log(Event::CashFloorReplenished {
                        period,
                        min_cash,
                        cash_after: self.assets.cash,
                    });
                }
                outcome
            }
            None => LiquidationOutcome::default(),
        };
        let floor_gap = self
            .config
            .min_cash
            .map(|min_cash| (min_cash - self.assets.cash).max(0.0))
            .unwrap_or(0.0);

        // 4. Metrics
        let metrics = PeriodMetrics::compute(
            &self.assets,
            &self.liabilities,
            &self.config.haircuts,
            withdrawal,
        );
        let realized_loss = withdrawal_pass.realized_loss + floor_pass.realized_loss;
        self.cumulative_loss += realized_loss;

        // 5. Survival
        let check = PeriodCheck {
            period,
            metrics,
            remaining_need: withdrawal_pass.remaining_need,
            cash: self.assets.cash,
            min_cash: self.config.min_cash,
            non_cash_priority_exhausted: self.non_cash_priority_exhausted(),
        };
        if let SurvivalState::Breached { reasons, .. } = self.evaluator.evaluate(&check) {
            let reasons = reasons.clone();
            self.event_log.log(Event::SurvivalBreached { period, reasons });
        }

        debug!(
            "Period {}: withdrawal {:.4}, equity {:.4}, LCR {:.4}, NSFR {:.4}, loss {:.4}",
            period, withdrawal, metrics.equity, metrics.lcr, metrics.nsfr, realized_loss
        );

        // 6. Snapshot
        let mut sales = withdrawal_pass.sales;
        sales.extend(floor_pass.sales);
        self.snapshots.push(PeriodSnapshot {
            period,
            withdrawal,
            opening_assets,
            opening_liabilities,
            closing_assets: self.assets,
            closing_liabilities: self.liabilities,
            equity: metrics.equity,
            realized_loss,
            cumulative_loss: self.cumulative_loss,
            lcr: metrics.lcr,
            nsfr: metrics.nsfr,
            remaining_need: withdrawal_pass.remaining_need,
            floor_gap,
            sales,
        });

        self.next_index += 1;
        self.snapshots.last()
    }

    /// Run every remaining period and return the result
    pub fn run(mut self) -> SimulationResult {
        while self.step().is_some() {}
        self.into_result()
    }

    /// Finish the run without simulating further periods
    pub fn into_result(self) -> SimulationResult {
        let (survival_period, reasons) = match self.evaluator.state() {
            SurvivalState::Running => (None, Vec::new()),
            SurvivalState::Breached { period, reasons } => (Some(*period), reasons.clone()),
        };

        match survival_period {
            Some(period) => info!("Simulation finished: breach at period {}", period),
            None => info!(
                "Simulation finished: survived {} periods",
                self.snapshots.len() - 1
            ),
        }

        SimulationResult::new(
            self.config_hash,
            self.config.breach_policy,
            self.snapshots,
            survival_period,
            reasons,
            self.event_log,
        )
    }

    fn log_sales(&mut self, period: usize, outcome: &LiquidationOutcome) {
        for sale in &outcome.sales {
            self.event_log.log(Event::liquidation(period, sale));
        }
    }

    fn non_cash_priority_exhausted(&self) -> bool {
        self.config
            .priority
            .iter()
            .filter(|c| **c != AssetCategory::Cash)
            .all(|c| self.assets.get(*c) <= FUNDING_TOLERANCE)
    }
}

/// Run a complete simulation from an immutable configuration
///
/// Pure with respect to its input: `config` is cloned into the run.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult, SimulationError> {
    Ok(Simulation::new(config.clone())?.run())
}
