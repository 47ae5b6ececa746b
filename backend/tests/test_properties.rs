//! Property tests for the balance-sheet roll-forward
//!
//! Invariants checked over random books, haircuts, priorities and
//! withdrawal paths:
//! - Conservation, balance check, non-negativity, priority exclusion
//!   (via `validate_result`)
//! - Idempotence of repeated runs
//! - Haircut monotonicity of a single liquidation

use bank_survival_core_rs::{
    liquidate, run_simulation, validate_result, AssetBook, AssetCategory, BreachPolicy,
    HaircutTable, LiabilityBook, SimulationConfig,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn amount() -> impl Strategy<Value = f64> {
    0.0..1_000.0f64
}

fn haircut() -> impl Strategy<Value = f64> {
    0.0..0.95f64
}

fn asset_book() -> impl Strategy<Value = AssetBook> {
    (amount(), amount(), amount(), amount())
        .prop_map(|(cash, hqla, loans, re)| AssetBook::new(cash, hqla, loans, re))
}

fn priority() -> impl Strategy<Value = Vec<AssetCategory>> {
    proptest::sample::subsequence(AssetCategory::ALL.to_vec(), 0..=4).prop_shuffle()
}

fn policy() -> impl Strategy<Value = BreachPolicy> {
    prop_oneof![
        Just(BreachPolicy::RatioThreshold),
        Just(BreachPolicy::FundingFeasibility)
    ]
}

prop_compose! {
    fn config()(
        opening_assets in asset_book(),
        deposits in amount(),
        wholesale in amount(),
        hqla in haircut(),
        loans in haircut(),
        real_estate in haircut(),
        priority in priority(),
        withdrawals in proptest::collection::vec(0.0..400.0f64, 0..8),
        min_cash in proptest::option::of(0.0..200.0f64),
        breach_policy in policy(),
        halt_on_unfunded_withdrawal in any::<bool>(),
    ) -> SimulationConfig {
        SimulationConfig {
            opening_assets,
            opening_liabilities: LiabilityBook::new(deposits, wholesale),
            haircuts: HaircutTable::new(hqla, loans, real_estate),
            priority,
            withdrawals,
            min_cash,
            breach_policy,
            halt_on_unfunded_withdrawal,
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_every_run_passes_audit(config in config()) {
        let result = run_simulation(&config).unwrap();
        let audit = validate_result(&result, &config, 1e-6);
        prop_assert!(audit.is_ok(), "audit failed: {:?}", audit);
    }

    #[test]
    fn prop_unlisted_categories_never_decrease(config in config()) {
        let result = run_simulation(&config).unwrap();
        for snapshot in result.snapshots() {
            for category in AssetCategory::ALL {
                if !config.priority.contains(&category) {
                    prop_assert!(
                        snapshot.closing_assets.get(category) >= config.opening_assets.get(category) - 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn prop_runs_are_idempotent(config in config()) {
        let first = run_simulation(&config).unwrap();
        let second = run_simulation(&config).unwrap();
        prop_assert_eq!(first.snapshots(), second.snapshots());
        prop_assert_eq!(first.survival_period(), second.survival_period());
    }

    #[test]
    fn prop_run_stops_at_first_breach(config in config()) {
        let result = run_simulation(&config).unwrap();
        match result.survival_period() {
            Some(period) => prop_assert_eq!(result.periods_simulated(), period),
            None => prop_assert_eq!(result.periods_simulated(), config.withdrawals.len()),
        }
    }

    #[test]
    fn prop_higher_haircut_sells_more_and_loses_more(
        available in 1.0..1_000.0f64,
        need in 0.0..1_500.0f64,
        low in 0.0..0.9f64,
        bump in 0.0..0.09f64,
    ) {
        let high = low + bump;
        let priority = [AssetCategory::Loans];

        let mut low_book = AssetBook::new(0.0, 0.0, available, 0.0);
        let mut high_book = low_book;
        let low_outcome = liquidate(&mut low_book, need, &HaircutTable::new(0.0, low, 0.0), &priority);
        let high_outcome = liquidate(&mut high_book, need, &HaircutTable::new(0.0, high, 0.0), &priority);

        prop_assert!(high_outcome.sold(AssetCategory::Loans) >= low_outcome.sold(AssetCategory::Loans) - 1e-9);
        prop_assert!(high_outcome.realized_loss >= low_outcome.realized_loss - 1e-9);
        prop_assert!(high_outcome.cash_generated <= low_outcome.cash_generated + 1e-9);
    }
}
