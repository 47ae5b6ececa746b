//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::books::{AssetBook, LiabilityBook};
use crate::models::category::AssetCategory;
use crate::models::haircut::HaircutTable;
use crate::models::snapshot::{PeriodSnapshot, SimulationResult};
use crate::orchestrator::SimulationConfig;
use crate::report::SurvivalIndicator;
use crate::survival::BreachPolicy;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

fn value_error(msg: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(msg)
}

/// Extract an optional field from a Python dict.
///
/// Returns error only if type conversion fails (not if field is missing).
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    Ok(extract_optional(dict, key)?.unwrap_or(default))
}

fn extract_subdict<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into::<PyDict>()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to SimulationConfig
///
/// Missing fields take the reference defaults. The config is validated
/// here so malformed input never reaches the engine.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let defaults = SimulationConfig::default();

    let opening_assets = match extract_subdict(py_config, "opening_assets")? {
        Some(d) => AssetBook::new(
            extract_with_default(&d, "cash", defaults.opening_assets.cash)?,
            extract_with_default(&d, "hqla", defaults.opening_assets.hqla)?,
            extract_with_default(&d, "loans", defaults.opening_assets.loans)?,
            extract_with_default(&d, "real_estate", defaults.opening_assets.real_estate)?,
        ),
        None => defaults.opening_assets,
    };

    let opening_liabilities = match extract_subdict(py_config, "opening_liabilities")? {
        Some(d) => LiabilityBook::new(
            extract_with_default(&d, "deposits", defaults.opening_liabilities.deposits)?,
            extract_with_default(&d, "wholesale", defaults.opening_liabilities.wholesale)?,
        ),
        None => defaults.opening_liabilities,
    };

    let haircuts = match extract_subdict(py_config, "haircuts")? {
        Some(d) => {
            if d.contains("cash")? {
                return Err(value_error("Cash haircut is fixed at 0 and cannot be set".to_string()));
            }
            HaircutTable::new(
                extract_with_default(&d, "hqla", defaults.haircuts.hqla)?,
                extract_with_default(&d, "loans", defaults.haircuts.loans)?,
                extract_with_default(&d, "real_estate", defaults.haircuts.real_estate)?,
            )
        }
        None => defaults.haircuts,
    };

    let priority = match extract_optional::<Vec<String>>(py_config, "priority")? {
        Some(names) => names
            .iter()
            .map(|name| name.parse::<AssetCategory>().map_err(|e| value_error(e.to_string())))
            .collect::<PyResult<Vec<_>>>()?,
        None => defaults.priority,
    };

    let breach_policy = match extract_optional::<String>(py_config, "breach_policy")? {
        Some(name) => name.parse::<BreachPolicy>().map_err(value_error)?,
        None => defaults.breach_policy,
    };

    let config = SimulationConfig {
        opening_assets,
        opening_liabilities,
        haircuts,
        priority,
        withdrawals: extract_with_default(py_config, "withdrawals", defaults.withdrawals)?,
        min_cash: extract_optional(py_config, "min_cash")?,
        breach_policy,
        halt_on_unfunded_withdrawal: extract_with_default(
            py_config,
            "halt_on_unfunded_withdrawal",
            false,
        )?,
    };

    config.validate().map_err(|e| value_error(e.to_string()))?;
    Ok(config)
}

// ========================================================================
// Result Converters
// ========================================================================

fn assets_to_py<'py>(py: Python<'py>, assets: &AssetBook) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (category, quantity) in assets.iter() {
        dict.set_item(category.label(), quantity)?;
    }
    Ok(dict)
}

fn snapshot_to_py<'py>(py: Python<'py>, snapshot: &PeriodSnapshot) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("period", snapshot.period)?;
    dict.set_item("withdrawal", snapshot.withdrawal)?;
    dict.set_item("opening_assets", assets_to_py(py, &snapshot.opening_assets)?)?;
    dict.set_item("closing_assets", assets_to_py(py, &snapshot.closing_assets)?)?;
    dict.set_item("deposits", snapshot.closing_liabilities.deposits)?;
    dict.set_item("wholesale", snapshot.closing_liabilities.wholesale)?;
    dict.set_item("equity", snapshot.equity)?;
    dict.set_item("lcr", snapshot.lcr)?;
    dict.set_item("nsfr", snapshot.nsfr)?;
    dict.set_item("realized_loss", snapshot.realized_loss)?;
    dict.set_item("cumulative_loss", snapshot.cumulative_loss)?;
    dict.set_item("remaining_need", snapshot.remaining_need)?;
    dict.set_item("floor_gap", snapshot.floor_gap)?;
    dict.set_item("balance_check", snapshot.balance_check())?;
    Ok(dict)
}

/// Convert a SimulationResult to a Python dict
pub fn result_to_py(py: Python<'_>, result: &SimulationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("run_id", result.run_id().to_string())?;
    dict.set_item("config_hash", result.config_hash())?;
    dict.set_item("survival_period", result.survival_period())?;
    dict.set_item("survived", result.survived())?;
    dict.set_item(
        "survival_message",
        SurvivalIndicator::from_result(result).to_string(),
    )?;

    let reasons: Vec<String> = result.breach_reasons().iter().map(|r| r.to_string()).collect();
    dict.set_item("breach_reasons", reasons)?;

    let snapshots = PyList::empty_bound(py);
    for snapshot in result.snapshots() {
        snapshots.append(snapshot_to_py(py, snapshot)?)?;
    }
    dict.set_item("snapshots", snapshots)?;

    Ok(dict.unbind())
}
