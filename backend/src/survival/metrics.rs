//! Equity and simplified liquidity/funding ratios

use crate::models::books::{equity, AssetBook, LiabilityBook};
use crate::models::category::AssetCategory;
use crate::models::haircut::HaircutTable;
use serde::{Deserialize, Serialize};

/// Available stable funding weight on deposits
pub const ASF_DEPOSIT_WEIGHT: f64 = 0.90;
/// Available stable funding weight on wholesale funding
pub const ASF_WHOLESALE_WEIGHT: f64 = 0.50;
/// Required stable funding weight on loans
pub const RSF_LOAN_WEIGHT: f64 = 0.85;
/// Required stable funding weight on real estate
pub const RSF_REAL_ESTATE_WEIGHT: f64 = 1.00;

/// Ratio denominators are floored at this value
const DENOMINATOR_FLOOR: f64 = 1.0;

/// LCR = (cash + HQLA × (1 − HQLA haircut)) / max(outflow, 1)
///
/// # Example
/// ```
/// use bank_survival_core_rs::{AssetBook, HaircutTable};
/// use bank_survival_core_rs::survival::liquidity_coverage_ratio;
///
/// let assets = AssetBook::new(50.0, 200.0, 400.0, 200.0);
/// let lcr = liquidity_coverage_ratio(&assets, &HaircutTable::new(0.05, 0.25, 0.35), 50.0);
/// assert!((lcr - 4.8).abs() < 1e-12);
/// ```
pub fn liquidity_coverage_ratio(assets: &AssetBook, haircuts: &HaircutTable, outflow: f64) -> f64 {
    let stock = assets.cash + assets.hqla * haircuts.retention(AssetCategory::Hqla);
    stock / outflow.max(DENOMINATOR_FLOOR)
}

/// NSFR = (deposits × 0.90 + wholesale × 0.50) / max(loans × 0.85 + real estate × 1.00, 1)
pub fn net_stable_funding_ratio(assets: &AssetBook, liabilities: &LiabilityBook) -> f64 {
    let available = liabilities.deposits * ASF_DEPOSIT_WEIGHT
        + liabilities.wholesale * ASF_WHOLESALE_WEIGHT;
    let required = assets.loans * RSF_LOAN_WEIGHT + assets.real_estate * RSF_REAL_ESTATE_WEIGHT;
    available / required.max(DENOMINATOR_FLOOR)
}

/// Metrics computed from a closing balance sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub equity: f64,
    pub lcr: f64,
    pub nsfr: f64,
}

impl PeriodMetrics {
    /// Compute metrics for a closing book and the period's withdrawal
    pub fn compute(
        assets: &AssetBook,
        liabilities: &LiabilityBook,
        haircuts: &HaircutTable,
        withdrawal: f64,
    ) -> Self {
        Self {
            total_assets: assets.total(),
            total_liabilities: liabilities.total(),
            equity: equity(assets, liabilities),
            lcr: liquidity_coverage_ratio(assets, haircuts, withdrawal),
            nsfr: net_stable_funding_ratio(assets, liabilities),
        }
    }
}
