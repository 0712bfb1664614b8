//! Row shapes of the four flat tables persisted per experiment run.

use serde::{Deserialize, Serialize};

/// One submitted parameter value, keyed by the owning run point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRow {
    /// Run point the value was submitted for.
    pub run_point_id: String,
    /// Upstream identifier of the interactive element.
    pub parameter_id: i64,
    /// Submitted value rendered as text.
    pub value: String,
}

/// One dashboard KPI cell for a successfully scored run point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Run point the cell belongs to.
    pub run_point_id: String,
    /// Aggregation level (`local`, `intermediate` or `national`).
    pub level: String,
    /// KPI name within the level.
    pub kpi: String,
    /// Reported KPI value.
    pub value: f64,
}

/// Cost benefit payloads for a successfully scored run point.
///
/// The `overview` and `detail` cells hold the nested maps as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefitRow {
    /// Run point the payloads belong to.
    pub run_point_id: String,
    /// Two-level aggregate view, JSON encoded.
    pub overview: String,
    /// Three-level breakdown, JSON encoded.
    pub detail: String,
}

/// Failure message recorded for a rejected run point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRow {
    /// Run point the endpoint rejected.
    pub run_point_id: String,
    /// Failure description reported by the endpoint.
    pub error_msg: String,
}
