//! PyO3 entry point for running a simulation

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulation_config, result_to_py};
use crate::orchestrator::run_simulation as run_rust_simulation;

/// Run a simulation from a configuration dict
///
/// # Example (from Python)
///
/// ```python
/// from bank_survival_core_rs import run_simulation
///
/// result = run_simulation({
///     "opening_assets": {"cash": 100, "hqla": 200, "loans": 400, "real_estate": 200},
///     "opening_liabilities": {"deposits": 600, "wholesale": 150},
///     "priority": ["Cash", "HQLA", "Loans", "RealEstate"],
///     "withdrawals": [50, 80, 120],
///     "breach_policy": "funding_feasibility",
///     "min_cash": 20,
/// })
/// print(result["survival_message"])
/// ```
///
/// # Errors
///
/// Raises ValueError if a field is malformed or validation fails.
#[pyfunction]
pub fn run_simulation(py: Python<'_>, config: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
    let rust_config = parse_simulation_config(config)?;

    let result = run_rust_simulation(&rust_config).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Simulation rejected: {}", e))
    })?;

    result_to_py(py, &result)
}
