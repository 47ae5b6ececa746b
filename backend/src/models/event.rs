//! Event logging for simulation auditing
//!
//! Every significant balance-sheet change during a run is captured as an
//! [`Event`] stamped with its period. The log lets reporting code explain
//! a run without re-deriving it from snapshots.
//!
//! # Example
//!
//! ```rust
//! use bank_survival_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::DepositsWithdrawn {
//!     period: 1,
//!     amount: 50.0,
//!     deposits_after: 550.0,
//! });
//!
//! assert_eq!(log.events_in_period(1).len(), 1);
//! assert_eq!(log.events_of_type("deposits_withdrawn").len(), 1);
//! ```

use crate::liquidation::{AssetSale, LiquidationPass};
use crate::models::category::AssetCategory;
use crate::survival::BreachReason;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Deposit run-off applied to the liability book
    DepositsWithdrawn {
        period: usize,
        amount: f64,
        deposits_after: f64,
    },

    /// Forced sale of an asset
    AssetLiquidated {
        period: usize,
        category: AssetCategory,
        pass: LiquidationPass,
        quantity: f64,
        proceeds: f64,
        loss: f64,
    },

    /// Floor-replenishment pass credited cash
    CashFloorReplenished {
        period: usize,
        min_cash: f64,
        cash_after: f64,
    },

    /// Listed assets ran out before the withdrawal was funded
    WithdrawalShortfall { period: usize, remaining_need: f64 },

    /// Survival condition breached; the run stops here
    SurvivalBreached {
        period: usize,
        reasons: Vec<BreachReason>,
    },
}

impl Event {
    pub fn liquidation(period: usize, sale: &AssetSale) -> Self {
        Event::AssetLiquidated {
            period,
            category: sale.category,
            pass: sale.pass,
            quantity: sale.quantity,
            proceeds: sale.proceeds,
            loss: sale.loss,
        }
    }

    /// Period the event belongs to
    pub fn period(&self) -> usize {
        match self {
            Event::DepositsWithdrawn { period, .. }
            | Event::AssetLiquidated { period, .. }
            | Event::CashFloorReplenished { period, .. }
            | Event::WithdrawalShortfall { period, .. }
            | Event::SurvivalBreached { period, .. } => *period,
        }
    }

    /// Snake-case type tag, matching the serialized `type` field
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::DepositsWithdrawn { .. } => "deposits_withdrawn",
            Event::AssetLiquidated { .. } => "asset_liquidated",
            Event::CashFloorReplenished { .. } => "cash_floor_replenished",
            Event::WithdrawalShortfall { .. } => "withdrawal_shortfall",
            Event::SurvivalBreached { .. } => "survival_breached",
        }
    }
}

/// Ordered log of simulation events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific period
    pub fn events_in_period(&self, period: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.period() == period).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}
