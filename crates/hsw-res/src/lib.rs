//! Read-side companion to the sweep engine's run store.

pub mod costbenefit;
pub mod loader;

pub use costbenefit::{DetailMap, OverviewMap};
pub use loader::{run_label, ResultLoader, RunTables};
