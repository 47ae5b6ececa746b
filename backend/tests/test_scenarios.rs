//! End-to-end scenario tests
//!
//! Reference book: assets {Cash 100, HQLA 200, Loans 400, RealEstate 200},
//! liabilities {Deposits 600, Wholesale 150}, haircuts
//! {HQLA 0.05, Loans 0.25, RealEstate 0.35}.

use bank_survival_core_rs::{
    run_simulation, validate_result, AssetBook, AssetCategory, BreachPolicy, BreachReason,
    SimulationConfig, SurvivalIndicator,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn reference_config(withdrawals: Vec<f64>) -> SimulationConfig {
    SimulationConfig {
        withdrawals,
        ..SimulationConfig::default()
    }
}

// ============================================================================
// Scenario A: withdrawals [50, 80, 120]
// ============================================================================

#[test]
fn test_scenario_a_period_one_paid_from_cash() {
    let config = reference_config(vec![50.0, 80.0, 120.0]);
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert_eq!(p1.closing_assets, AssetBook::new(50.0, 200.0, 400.0, 200.0));
    assert_eq!(p1.closing_liabilities.deposits, 550.0);
    assert_eq!(p1.equity, 150.0);
    assert_eq!(p1.realized_loss, 0.0);
    assert_close(p1.lcr, 240.0 / 50.0);
}

#[test]
fn test_scenario_a_period_two_taps_hqla() {
    let config = reference_config(vec![50.0, 80.0, 120.0]);
    let result = run_simulation(&config).unwrap();

    let p2 = &result.snapshots()[2];
    let hqla_sold = 30.0 / 0.95;
    assert_eq!(p2.closing_assets.cash, 0.0);
    assert_close(p2.closing_assets.hqla, 200.0 - hqla_sold);
    assert_close(p2.realized_loss, hqla_sold * 0.05);
    assert_close(p2.equity, 150.0 - hqla_sold * 0.05);
    assert_close(p2.lcr, 2.0);
}

#[test]
fn test_scenario_a_ratio_policy_breaches_on_lcr_in_period_three() {
    let config = reference_config(vec![50.0, 80.0, 120.0]);
    let result = run_simulation(&config).unwrap();

    // HQLA left after period 3 is worth 40 net against an outflow of 120
    let p3 = &result.snapshots()[3];
    assert_close(p3.closing_assets.hqla, 200.0 - 150.0 / 0.95);
    assert_close(p3.lcr, 40.0 / 120.0);
    assert!(p3.equity > 0.0);

    assert_eq!(result.survival_period(), Some(3));
    assert_eq!(result.breach_reasons(), &[BreachReason::LcrBelowOne]);
    assert!(validate_result(&result, &config, 1e-9).is_ok());
}

#[test]
fn test_scenario_a_funding_policy_survives() {
    let config = SimulationConfig {
        breach_policy: BreachPolicy::FundingFeasibility,
        ..reference_config(vec![50.0, 80.0, 120.0])
    };
    let result = run_simulation(&config).unwrap();

    assert_eq!(result.snapshots().len(), 4);
    assert_eq!(result.survival_period(), None);
    assert_close(result.total_realized_loss(), 150.0 / 0.95 * 0.05);
    assert_eq!(
        SurvivalIndicator::from_result(&result).to_string(),
        "Bank survives all periods"
    );
}

// ============================================================================
// Scenario B: withdrawal beyond liquidation capacity
// ============================================================================

#[test]
fn test_scenario_b_ratio_policy_breaches_at_period_one() {
    let config = reference_config(vec![10_000.0, 10.0]);
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert_close(p1.remaining_need, 9_280.0);
    assert_eq!(p1.closing_assets, AssetBook::default());
    assert_eq!(result.survival_period(), Some(1));
    assert!(result.breach_reasons().contains(&BreachReason::AssetsExhausted));
    assert!(result.breach_reasons().contains(&BreachReason::LcrBelowOne));
    assert_eq!(result.snapshots().len(), 2, "run must stop at the breach");
}

#[test]
fn test_scenario_b_funding_policy_breaches_at_period_one() {
    let config = SimulationConfig {
        breach_policy: BreachPolicy::FundingFeasibility,
        ..reference_config(vec![10_000.0])
    };
    let result = run_simulation(&config).unwrap();

    assert!(result.snapshots()[1].remaining_need > 0.0);
    assert_eq!(result.survival_period(), Some(1));
    assert_eq!(result.breach_reasons(), &[BreachReason::UnfundedWithdrawal]);
    assert_eq!(result.events().events_of_type("withdrawal_shortfall").len(), 1);
}

// ============================================================================
// Scenario C: cash floor
// ============================================================================

#[test]
fn test_scenario_c_floor_restored_from_real_estate() {
    let config = SimulationConfig {
        priority: vec![AssetCategory::Cash, AssetCategory::RealEstate],
        withdrawals: vec![90.0],
        min_cash: Some(20.0),
        breach_policy: BreachPolicy::FundingFeasibility,
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert_close(p1.closing_assets.cash, 20.0);
    assert_close(p1.closing_assets.real_estate, 200.0 - 10.0 / 0.65);
    assert_eq!(p1.floor_gap, 0.0);
    assert_eq!(p1.closing_assets.hqla, 200.0);
    assert_eq!(p1.closing_assets.loans, 400.0);
    assert_eq!(result.survival_period(), None);
    assert_eq!(result.events().events_of_type("cash_floor_replenished").len(), 1);
    assert!(validate_result(&result, &config, 1e-9).is_ok());
}

#[test]
fn test_scenario_c_floor_unrestorable_breaches() {
    let config = SimulationConfig {
        opening_assets: AssetBook::new(100.0, 200.0, 400.0, 5.0),
        priority: vec![AssetCategory::Cash, AssetCategory::RealEstate],
        withdrawals: vec![95.0, 10.0],
        min_cash: Some(20.0),
        breach_policy: BreachPolicy::FundingFeasibility,
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    // Withdrawal is funded from cash; the floor gets only 5 × 0.65
    let p1 = &result.snapshots()[1];
    assert_eq!(p1.remaining_need, 0.0);
    assert_close(p1.closing_assets.cash, 5.0 + 3.25);
    assert_close(p1.floor_gap, 20.0 - 8.25);
    assert_eq!(result.survival_period(), Some(1));
    assert_eq!(result.breach_reasons(), &[BreachReason::CashFloorUnrestorable]);
}

#[test]
fn test_floor_below_gap_with_assets_left_is_not_a_breach() {
    // HQLA is unlisted, so it cannot help; Loans still hold value after the pass
    let config = SimulationConfig {
        opening_assets: AssetBook::new(30.0, 200.0, 400.0, 0.0),
        priority: vec![AssetCategory::Cash, AssetCategory::Loans],
        withdrawals: vec![25.0],
        min_cash: Some(50.0),
        breach_policy: BreachPolicy::FundingFeasibility,
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert_close(p1.closing_assets.cash, 50.0);
    assert_close(p1.closing_assets.loans, 400.0 - 45.0 / 0.75);
    assert_eq!(result.survival_period(), None);
}

// ============================================================================
// Scenario D: empty withdrawal sequence
// ============================================================================

#[test]
fn test_scenario_d_empty_sequence_yields_opening_only() {
    let config = reference_config(Vec::new());
    let result = run_simulation(&config).unwrap();

    assert_eq!(result.snapshots().len(), 1);
    let opening = &result.snapshots()[0];
    assert!(opening.is_opening());
    assert_eq!(opening.closing_assets, config.opening_assets);
    assert_eq!(opening.equity, 150.0);
    assert_eq!(result.survival_period(), None);
    assert!(result.events().is_empty());
    assert_eq!(result.periods_simulated(), 0);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_inputs_give_identical_snapshots() {
    let config = reference_config(vec![50.0, 80.0, 120.0, 40.0]);

    let first = run_simulation(&config).unwrap();
    let second = run_simulation(&config).unwrap();

    assert_eq!(first.snapshots(), second.snapshots());
    assert_eq!(first.config_hash(), second.config_hash());
    assert_eq!(first.events(), second.events());
    assert_ne!(first.run_id(), second.run_id());
}
