//! Checkpoint - configuration fingerprints and result audits
//!
//! A result carries the fingerprint of the configuration that produced it.
//! [`validate_result`] re-checks the invariants every run must satisfy.
//!
//! # Critical Invariants
//!
//! - **Determinism**: Same config produces the same fingerprint and snapshots
//! - **Balance Check**: assets − (liabilities + equity) = 0 every period
//! - **Conservation**: closing assets = opening assets − haircut loss − cash paid out
//! - **Non-negativity**: no asset category ever goes negative
//! - **Priority Exclusion**: unlisted categories never decrease

use crate::models::category::AssetCategory;
use crate::models::snapshot::SimulationResult;
use crate::orchestrator::{SimulationConfig, SimulationError};
use serde::Serialize;
use sha2::{Digest, Sha256};

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Audit a result against the configuration that produced it
///
/// `tolerance` is an absolute tolerance, scaled by the opening balance-sheet
/// size for the conservation check.
pub fn validate_result(
    result: &SimulationResult,
    config: &SimulationConfig,
    tolerance: f64,
) -> Result<(), SimulationError> {
    let fail = |msg: String| Err(SimulationError::StateValidationError(msg));

    // 1. Config fingerprint
    let expected_hash = compute_config_hash(config)?;
    if result.config_hash() != expected_hash {
        return fail(format!(
            "Config hash mismatch: result {}, config {}",
            result.config_hash(),
            expected_hash
        ));
    }

    // 2. Opening snapshot matches the opening books
    let snapshots = result.snapshots();
    let Some(opening) = snapshots.first() else {
        return fail("Result has no opening snapshot".to_string());
    };
    if opening.period != 0
        || opening.closing_assets != config.opening_assets
        || opening.closing_liabilities != config.opening_liabilities
    {
        return fail("Opening snapshot does not match the opening books".to_string());
    }

    let scale = config.opening_assets.total().max(1.0);

    for (index, snapshot) in snapshots.iter().enumerate() {
        let period = snapshot.period;

        // 3. Period ordering and chaining
        if period != index {
            return fail(format!("Snapshot {} carries period {}", index, period));
        }
        if index > 0 {
            let previous = &snapshots[index - 1];
            if snapshot.opening_assets != previous.closing_assets
                || snapshot.opening_liabilities != previous.closing_liabilities
            {
                return fail(format!(
                    "Period {} does not open from period {} closing books",
                    period,
                    index - 1
                ));
            }
        }

        // 4. Non-negative assets
        for (category, quantity) in snapshot.closing_assets.iter() {
            if quantity < 0.0 {
                return fail(format!(
                    "Period {}: {} is negative ({})",
                    period, category, quantity
                ));
            }
        }

        // 5. Balance check
        if snapshot.balance_check().abs() > tolerance {
            return fail(format!(
                "Period {}: balance check {} exceeds tolerance",
                period,
                snapshot.balance_check()
            ));
        }

        // 6. Conservation
        let expected_total = snapshot.opening_assets.total()
            - snapshot.realized_loss
            - snapshot.cash_paid_out();
        if (snapshot.total_assets() - expected_total).abs() > tolerance * scale {
            return fail(format!(
                "Period {}: conservation violated, expected assets {}, got {}",
                period,
                expected_total,
                snapshot.total_assets()
            ));
        }

        // 7. Unlisted categories never decrease
        for category in AssetCategory::ALL {
            if !config.is_liquidatable(category)
                && snapshot.asset_decrease(category) > tolerance
            {
                return fail(format!(
                    "Period {}: {} decreased although it is not in the priority list",
                    period, category
                ));
            }
        }
    }

    // 8. Truncation at the breach period
    if let Some(breach) = result.survival_period() {
        if result.last().map(|s| s.period) != Some(breach) {
            return fail(format!(
                "Simulation continued past the breach at period {}",
                breach
            ));
        }
    }

    Ok(())
}
