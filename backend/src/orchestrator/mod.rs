//! Orchestrator - period-by-period simulation loop
//!
//! See `engine.rs` for the roll-forward and `checkpoint.rs` for
//! configuration fingerprints and result audits.

pub mod checkpoint;
pub mod engine;

// Re-export main types for convenience
pub use engine::{run_simulation, ConfigError, Simulation, SimulationConfig, SimulationError};

pub use checkpoint::{compute_config_hash, validate_result};
