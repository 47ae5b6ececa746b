//! Forced-sale haircuts
//!
//! A haircut is the fractional value lost when an asset is sold under
//! distress: proceeds = quantity sold × (1 − haircut).
//!
//! Cash always carries a zero haircut and cannot be configured. Every
//! other haircut must lie in [0, 1); a haircut of exactly 1 would make
//! the sell-sizing formula divide by zero.

use crate::models::category::AssetCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating a haircut table
#[derive(Debug, Error, PartialEq)]
pub enum HaircutError {
    #[error("Haircut for {category} must be in [0, 1), got {value}")]
    OutOfRange { category: AssetCategory, value: f64 },
}

/// Haircut fractions for the non-cash asset categories
///
/// # Example
/// ```
/// use bank_survival_core_rs::{AssetCategory, HaircutTable};
///
/// let haircuts = HaircutTable::new(0.05, 0.25, 0.35);
/// assert_eq!(haircuts.get(AssetCategory::Cash), 0.0);
/// assert_eq!(haircuts.get(AssetCategory::Loans), 0.25);
/// assert!(haircuts.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HaircutTable {
    #[serde(alias = "HQLA")]
    pub hqla: f64,
    pub loans: f64,
    pub real_estate: f64,
}

impl Default for HaircutTable {
    fn default() -> Self {
        Self {
            hqla: 0.05,
            loans: 0.25,
            real_estate: 0.35,
        }
    }
}

impl HaircutTable {
    pub fn new(hqla: f64, loans: f64, real_estate: f64) -> Self {
        Self {
            hqla,
            loans,
            real_estate,
        }
    }

    /// Haircut applied when selling `category` (0 for Cash)
    pub fn get(&self, category: AssetCategory) -> f64 {
        match category {
            AssetCategory::Cash => 0.0,
            AssetCategory::Hqla => self.hqla,
            AssetCategory::Loans => self.loans,
            AssetCategory::RealEstate => self.real_estate,
        }
    }

    /// Fraction of each unit sold that arrives as cash
    pub fn retention(&self, category: AssetCategory) -> f64 {
        1.0 - self.get(category)
    }

    /// Upper end of the reference input range for a category
    ///
    /// Haircuts above these values are accepted but unusual.
    pub fn reference_max(category: AssetCategory) -> f64 {
        match category {
            AssetCategory::Cash => 0.0,
            AssetCategory::Hqla => 0.5,
            AssetCategory::Loans => 0.7,
            AssetCategory::RealEstate => 0.8,
        }
    }

    /// Categories whose haircut exceeds the reference range
    pub fn beyond_reference_ranges(&self) -> Vec<AssetCategory> {
        AssetCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.get(*c) > Self::reference_max(*c))
            .collect()
    }

    /// Check every haircut lies in [0, 1)
    pub fn validate(&self) -> Result<(), HaircutError> {
        for category in AssetCategory::ALL {
            let value = self.get(category);
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(HaircutError::OutOfRange { category, value });
            }
        }
        Ok(())
    }
}
