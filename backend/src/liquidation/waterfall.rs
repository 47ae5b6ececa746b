//! Priority waterfall for forced asset sales
//!
//! For each category in priority order, the gross quantity sold is the
//! amount whose net proceeds cover the outstanding need:
//!
//! ```text
//! sell     = min(available, need / (1 - haircut))
//! proceeds = sell × (1 - haircut)
//! loss     = sell × haircut
//! ```
//!
//! When a sale is not capped by availability its proceeds equal the need
//! exactly, so an uncapped sale always closes the need to zero.

use crate::models::books::AssetBook;
use crate::models::category::AssetCategory;
use crate::models::haircut::HaircutTable;
use log::debug;
use serde::{Deserialize, Serialize};

/// Which liquidation pass produced a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidationPass {
    /// Proceeds fund a deposit withdrawal
    Withdrawal,
    /// Proceeds are credited to Cash to restore the floor
    CashFloor,
}

/// A single forced sale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetSale {
    pub category: AssetCategory,
    pub pass: LiquidationPass,
    /// Gross quantity removed from the book
    pub quantity: f64,
    /// Net cash generated
    pub proceeds: f64,
    /// Value lost to the haircut
    pub loss: f64,
}

/// Result of one liquidation pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiquidationOutcome {
    /// Sales in the order they were executed
    pub sales: Vec<AssetSale>,
    /// Cash still needed after every eligible category was tried
    ///
    /// Positive only when the priority list ran out of assets.
    pub remaining_need: f64,
    /// Σ quantity × haircut over all sales
    pub realized_loss: f64,
    /// Σ net proceeds over all sales
    pub cash_generated: f64,
}

impl LiquidationOutcome {
    /// True if the pass could not raise the full amount requested
    pub fn has_shortfall(&self) -> bool {
        self.remaining_need > 0.0
    }

    /// Total gross quantity sold from a category in this pass
    pub fn sold(&self, category: AssetCategory) -> f64 {
        self.sales
            .iter()
            .filter(|s| s.category == category)
            .map(|s| s.quantity)
            .sum()
    }
}

/// Sell assets in priority order to raise `need` in cash for a withdrawal
///
/// Proceeds leave the bank. Returns the sales made, the remaining need
/// (positive only if the listed assets are exhausted) and the realized
/// haircut loss.
///
/// A zero or negative `need` performs no sales.
pub fn liquidate(
    assets: &mut AssetBook,
    need: f64,
    haircuts: &HaircutTable,
    priority: &[AssetCategory],
) -> LiquidationOutcome {
    run_waterfall(
        assets,
        need,
        haircuts,
        priority.iter().copied(),
        LiquidationPass::Withdrawal,
    )
}

/// Restore Cash to `min_cash` by selling non-cash assets in priority order
///
/// Cash is skipped even if it appears in `priority`. Net proceeds are
/// credited to Cash. If Cash already meets the floor nothing is sold.
/// `remaining_need` is the floor gap left after the listed assets are
/// exhausted.
pub fn replenish_cash_floor(
    assets: &mut AssetBook,
    min_cash: f64,
    haircuts: &HaircutTable,
    priority: &[AssetCategory],
) -> LiquidationOutcome {
    let gap = min_cash - assets.cash;
    if gap <= 0.0 {
        return LiquidationOutcome::default();
    }

    let sources = priority
        .iter()
        .copied()
        .filter(|c| *c != AssetCategory::Cash);

    let outcome = run_waterfall(assets, gap, haircuts, sources, LiquidationPass::CashFloor);
    assets.credit(AssetCategory::Cash, outcome.cash_generated);
    outcome
}

fn run_waterfall(
    assets: &mut AssetBook,
    need: f64,
    haircuts: &HaircutTable,
    priority: impl Iterator<Item = AssetCategory>,
    pass: LiquidationPass,
) -> LiquidationOutcome {
    let mut outcome = LiquidationOutcome {
        remaining_need: need.max(0.0),
        ..Default::default()
    };

    for category in priority {
        if outcome.remaining_need <= 0.0 {
            break;
        }

        let available = assets.get(category);
        if available <= 0.0 {
            continue;
        }

        let haircut = haircuts.get(category);
        let retention = 1.0 - haircut;
        let gross_needed = outcome.remaining_need / retention;

        let (quantity, proceeds) = if gross_needed <= available {
            (gross_needed, outcome.remaining_need)
        } else {
            (available, available * retention)
        };
        let loss = quantity * haircut;

        assets.reduce(category, quantity);
        outcome.remaining_need = if gross_needed <= available {
            0.0
        } else {
            (outcome.remaining_need - proceeds).max(0.0)
        };
        outcome.realized_loss += loss;
        outcome.cash_generated += proceeds;

        debug!(
            "{:?} pass sold {:.4} {} (proceeds {:.4}, loss {:.4}, still needed {:.4})",
            pass, quantity, category, proceeds, loss, outcome.remaining_need
        );

        outcome.sales.push(AssetSale {
            category,
            pass,
            quantity,
            proceeds,
            loss,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haircuts() -> HaircutTable {
        HaircutTable::new(0.05, 0.25, 0.35)
    }

    #[test]
    fn test_zero_need_sells_nothing() {
        let mut assets = AssetBook::new(100.0, 200.0, 400.0, 200.0);
        let outcome = liquidate(&mut assets, 0.0, &haircuts(), &AssetCategory::ALL);
        assert!(outcome.sales.is_empty());
        assert_eq!(assets, AssetBook::new(100.0, 200.0, 400.0, 200.0));
    }

    #[test]
    fn test_uncapped_sale_closes_need_exactly() {
        let mut assets = AssetBook::new(0.0, 200.0, 0.0, 0.0);
        let outcome = liquidate(&mut assets, 30.0, &haircuts(), &[AssetCategory::Hqla]);
        assert_eq!(outcome.remaining_need, 0.0);
        assert_eq!(outcome.cash_generated, 30.0);
        assert!((outcome.sold(AssetCategory::Hqla) - 30.0 / 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_floor_skips_cash_even_if_listed() {
        let mut assets = AssetBook::new(5.0, 0.0, 0.0, 100.0);
        let outcome = replenish_cash_floor(&mut assets, 20.0, &haircuts(), &AssetCategory::ALL);
        assert!(outcome.sales.iter().all(|s| s.category != AssetCategory::Cash));
        assert_eq!(assets.cash, 20.0);
    }

    #[test]
    fn test_floor_already_met_is_noop() {
        let mut assets = AssetBook::new(50.0, 10.0, 0.0, 0.0);
        let outcome = replenish_cash_floor(&mut assets, 20.0, &haircuts(), &AssetCategory::ALL);
        assert_eq!(outcome, LiquidationOutcome::default());
        assert_eq!(assets.hqla, 10.0);
    }
}
