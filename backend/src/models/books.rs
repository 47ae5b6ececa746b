//! Balance sheet state
//!
//! Holds asset and liability quantities. Equity is never stored: it is
//! always derived as total assets minus total liabilities.
//!
//! # Critical Invariants
//!
//! 1. **Non-negative assets**: liquidation is capped at the available balance
//! 2. **Derived equity**: recomputed from the books after every mutation

use crate::models::category::{AssetCategory, LiabilityCategory};
use serde::{Deserialize, Serialize};

/// Asset side of the balance sheet
///
/// # Example
/// ```
/// use bank_survival_core_rs::{AssetBook, AssetCategory};
///
/// let mut assets = AssetBook::new(100.0, 200.0, 400.0, 200.0);
/// assert_eq!(assets.total(), 900.0);
///
/// assets.reduce(AssetCategory::Cash, 30.0);
/// assert_eq!(assets.get(AssetCategory::Cash), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetBook {
    pub cash: f64,
    #[serde(alias = "HQLA")]
    pub hqla: f64,
    pub loans: f64,
    pub real_estate: f64,
}

impl AssetBook {
    pub fn new(cash: f64, hqla: f64, loans: f64, real_estate: f64) -> Self {
        Self {
            cash,
            hqla,
            loans,
            real_estate,
        }
    }

    /// Quantity held in a category
    pub fn get(&self, category: AssetCategory) -> f64 {
        match category {
            AssetCategory::Cash => self.cash,
            AssetCategory::Hqla => self.hqla,
            AssetCategory::Loans => self.loans,
            AssetCategory::RealEstate => self.real_estate,
        }
    }

    fn slot_mut(&mut self, category: AssetCategory) -> &mut f64 {
        match category {
            AssetCategory::Cash => &mut self.cash,
            AssetCategory::Hqla => &mut self.hqla,
            AssetCategory::Loans => &mut self.loans,
            AssetCategory::RealEstate => &mut self.real_estate,
        }
    }

    /// Remove up to `amount` from a category, returning what was removed
    ///
    /// The category is clamped at zero; the return value is the quantity
    /// actually taken.
    pub fn reduce(&mut self, category: AssetCategory, amount: f64) -> f64 {
        let slot = self.slot_mut(category);
        let taken = amount.min(*slot).max(0.0);
        *slot -= taken;
        taken
    }

    /// Add a non-negative amount to a category
    pub fn credit(&mut self, category: AssetCategory, amount: f64) {
        *self.slot_mut(category) += amount.max(0.0);
    }

    /// Sum of all categories
    pub fn total(&self) -> f64 {
        self.cash + self.hqla + self.loans + self.real_estate
    }

    /// Iterate `(category, quantity)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, f64)> + '_ {
        AssetCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Liability side of the balance sheet
///
/// Deposits may go negative when a withdrawal exceeds the deposit base;
/// no clamping is applied on this side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiabilityBook {
    pub deposits: f64,
    pub wholesale: f64,
}

impl LiabilityBook {
    pub fn new(deposits: f64, wholesale: f64) -> Self {
        Self { deposits, wholesale }
    }

    pub fn get(&self, category: LiabilityCategory) -> f64 {
        match category {
            LiabilityCategory::Deposits => self.deposits,
            LiabilityCategory::Wholesale => self.wholesale,
        }
    }

    /// Apply a deposit run-off of `amount`
    pub fn withdraw_deposits(&mut self, amount: f64) {
        self.deposits -= amount;
    }

    pub fn total(&self) -> f64 {
        self.deposits + self.wholesale
    }

    pub fn iter(&self) -> impl Iterator<Item = (LiabilityCategory, f64)> + '_ {
        LiabilityCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

/// Total assets of a book
pub fn total_assets(assets: &AssetBook) -> f64 {
    assets.total()
}

pub fn total_liabilities(liabilities: &LiabilityBook) -> f64 {
    liabilities.total()
}

/// Equity = total assets − total liabilities
///
/// # Example
/// ```
/// use bank_survival_core_rs::{equity, AssetBook, LiabilityBook};
///
/// let assets = AssetBook::new(100.0, 200.0, 400.0, 200.0);
/// let liabilities = LiabilityBook::new(600.0, 150.0);
/// assert_eq!(equity(&assets, &liabilities), 150.0);
/// ```
pub fn equity(assets: &AssetBook, liabilities: &LiabilityBook) -> f64 {
    assets.total() - liabilities.total()
}
