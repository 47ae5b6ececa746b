//! Python bindings (feature `pyo3`)
//!
//! Exposes a single stateless entry point: each call builds its own
//! simulation from a configuration dict and returns plain Python data.

pub mod simulation;
pub mod types;
