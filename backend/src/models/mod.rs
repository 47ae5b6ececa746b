//! Domain models for the balance-sheet simulator

pub mod books;
pub mod category;
pub mod event;
pub mod haircut;
pub mod snapshot;

// Re-exports
pub use books::{equity, total_assets, total_liabilities, AssetBook, LiabilityBook};
pub use category::{AssetCategory, LiabilityCategory, UnknownCategory};
pub use event::{Event, EventLog};
pub use haircut::{HaircutError, HaircutTable};
pub use snapshot::{PeriodSnapshot, SimulationResult};
