//! Survival evaluation through the engine
//!
//! Covers breach-policy selection, the unfunded-withdrawal strictness flag,
//! truncation at the first breach, and the per-period event trail.

use bank_survival_core_rs::models::Event;
use bank_survival_core_rs::survival::SurvivalState;
use bank_survival_core_rs::{
    run_simulation, AssetCategory, BreachPolicy, BreachReason, LiquidationPass, Simulation,
    SimulationConfig,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Cash is the only listed asset, so withdrawals above 100 go unfunded
/// while HQLA keeps the LCR above 1.
fn cash_only_config(withdrawals: Vec<f64>, strict: bool) -> SimulationConfig {
    SimulationConfig {
        priority: vec![AssetCategory::Cash],
        withdrawals,
        halt_on_unfunded_withdrawal: strict,
        ..SimulationConfig::default()
    }
}

// ============================================================================
// Strictness flag
// ============================================================================

#[test]
fn test_lenient_ratio_policy_continues_after_unfunded_withdrawal() {
    let config = cash_only_config(vec![150.0, 10.0], false);
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert_eq!(p1.remaining_need, 50.0);
    assert!(p1.lcr >= 1.0);
    assert!(p1.equity > 0.0);

    // LCR in period 2 = 190 / 10
    assert_eq!(result.snapshots().len(), 3);
    assert_eq!(result.survival_period(), None);
}

#[test]
fn test_strict_ratio_policy_halts_on_unfunded_withdrawal() {
    let config = cash_only_config(vec![150.0, 10.0], true);
    let result = run_simulation(&config).unwrap();

    assert_eq!(result.survival_period(), Some(1));
    assert_eq!(result.breach_reasons(), &[BreachReason::UnfundedWithdrawal]);
    assert_eq!(result.snapshots().len(), 2);
}

#[test]
fn test_funding_policy_always_halts_on_unfunded_withdrawal() {
    let config = SimulationConfig {
        breach_policy: BreachPolicy::FundingFeasibility,
        ..cash_only_config(vec![150.0], false)
    };
    let result = run_simulation(&config).unwrap();

    assert_eq!(result.survival_period(), Some(1));
}

// ============================================================================
// Ratio policy edge cases
// ============================================================================

#[test]
fn test_non_positive_equity_breaches() {
    // Equity starts at zero: assets 900, liabilities 900
    let mut config = SimulationConfig {
        withdrawals: vec![10.0],
        ..SimulationConfig::default()
    };
    config.opening_liabilities.wholesale = 300.0;

    let result = run_simulation(&config).unwrap();

    assert_eq!(result.survival_period(), Some(1));
    assert_eq!(result.breach_reasons(), &[BreachReason::NonPositiveEquity]);
}

#[test]
fn test_zero_withdrawal_period_sells_nothing() {
    let config = SimulationConfig {
        withdrawals: vec![0.0, 50.0],
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert!(p1.sales.is_empty());
    assert_eq!(p1.closing_assets, config.opening_assets);
    assert_eq!(p1.closing_liabilities, config.opening_liabilities);
    // Outflow of 0 is floored at 1
    assert!((p1.lcr - 290.0).abs() < 1e-9);
    assert_eq!(result.survival_period(), None);
}

#[test]
fn test_floor_applies_under_ratio_policy() {
    let config = SimulationConfig {
        withdrawals: vec![90.0],
        min_cash: Some(20.0),
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let p1 = &result.snapshots()[1];
    assert!((p1.closing_assets.cash - 20.0).abs() < 1e-9);
    // Floor is restored from HQLA, the first non-cash category
    assert!((p1.closing_assets.hqla - (200.0 - 10.0 / 0.95)).abs() < 1e-9);
    assert!(p1
        .sales
        .iter()
        .any(|s| s.pass == LiquidationPass::CashFloor && s.category == AssetCategory::Hqla));
}

// ============================================================================
// Stepwise execution and events
// ============================================================================

#[test]
fn test_step_by_step_matches_run() {
    let config = SimulationConfig {
        withdrawals: vec![50.0, 80.0],
        ..SimulationConfig::default()
    };

    let mut sim = Simulation::new(config.clone()).unwrap();
    assert_eq!(sim.snapshots().len(), 1);

    let p1 = sim.step().cloned().unwrap();
    assert_eq!(p1.period, 1);
    assert_eq!(sim.assets().cash, 50.0);
    assert_eq!(sim.liabilities().deposits, 550.0);

    sim.step();
    assert!(sim.is_finished());
    assert_eq!(sim.survival_state(), &SurvivalState::Running);

    let stepped = sim.into_result();
    let ran = run_simulation(&config).unwrap();
    assert_eq!(stepped.snapshots(), ran.snapshots());
}

#[test]
fn test_event_trail_for_period() {
    let config = SimulationConfig {
        withdrawals: vec![50.0, 80.0],
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let events = result.events().events_in_period(2);
    assert_eq!(events.len(), 3);
    assert!(matches!(
        events[0],
        Event::DepositsWithdrawn { amount, deposits_after, .. } if *amount == 80.0 && *deposits_after == 470.0
    ));
    assert!(matches!(
        events[1],
        Event::AssetLiquidated { category: AssetCategory::Cash, .. }
    ));
    assert!(matches!(
        events[2],
        Event::AssetLiquidated { category: AssetCategory::Hqla, .. }
    ));
}

#[test]
fn test_breach_is_logged_once() {
    let config = SimulationConfig {
        withdrawals: vec![50.0, 80.0, 120.0, 10.0],
        ..SimulationConfig::default()
    };
    let result = run_simulation(&config).unwrap();

    let breaches = result.events().events_of_type("survival_breached");
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].period(), 3);
    assert_eq!(result.last().map(|s| s.period), Some(3));
}
