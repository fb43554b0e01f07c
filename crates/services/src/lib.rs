#![forbid(unsafe_code)]

//! Service layer wiring the progress model to a persistence store.

pub mod catalog;
pub mod progress_tracker;

pub use logic_core::Clock;

pub use catalog::{BuiltinCatalog, ModuleCatalog};
pub use progress_tracker::ProgressTracker;
