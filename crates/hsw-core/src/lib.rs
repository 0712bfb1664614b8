#![deny(missing_docs)]

//! Core types for the holon sweep engine: the interactive element model and
//! its expansion rules, the scoring response schemas with their status-driven
//! classifier, and the row shapes of the persisted flat tables.

pub mod elements;
pub mod errors;
pub mod response;
pub mod tables;

pub use elements::{ElementBinding, ElementValue, FixedElement, SweepElement};
pub use errors::{ErrorInfo, SweepError};
pub use response::{
    classify_reply, CostBenefitResults, DashboardKpis, DashboardResults, PointOutcome,
    ScoreFailure, ScoreSuccess,
};
pub use tables::{CostBenefitRow, ErrorRow, InputRow, ResultRow};
