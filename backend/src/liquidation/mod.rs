//! Liquidation Engine
//!
//! Raises cash by selling assets in a configured priority order, applying
//! forced-sale haircuts.
//!
//! Two passes exist:
//! - **Withdrawal pass** ([`liquidate`]): proceeds leave the bank to pay
//!   depositors. Cash in the priority list is "sold" at par.
//! - **Cash-floor pass** ([`replenish_cash_floor`]): proceeds are credited
//!   to Cash until a minimum balance is restored. Cash is never a source.
//!
//! # Critical Invariants
//!
//! 1. **No negative assets**: each sale is capped at the available quantity
//! 2. **Priority exclusion**: categories absent from the priority list are never sold
//! 3. **Loss accounting**: realized loss = Σ quantity sold × haircut
//!
//! # Example
//!
//! ```rust
//! use bank_survival_core_rs::{AssetBook, AssetCategory, HaircutTable};
//! use bank_survival_core_rs::liquidation;
//!
//! let mut assets = AssetBook::new(100.0, 200.0, 400.0, 200.0);
//! let haircuts = HaircutTable::new(0.05, 0.25, 0.35);
//! let priority = [AssetCategory::Cash, AssetCategory::Hqla];
//!
//! let outcome = liquidation::liquidate(&mut assets, 130.0, &haircuts, &priority);
//! assert_eq!(assets.cash, 0.0);
//! assert_eq!(outcome.remaining_need, 0.0);
//! assert!(outcome.realized_loss > 0.0);
//! ```

pub mod waterfall;

pub use waterfall::{
    liquidate, replenish_cash_floor, AssetSale, LiquidationOutcome, LiquidationPass,
};
