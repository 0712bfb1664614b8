//! Scoring response schemas and the status-driven reply classifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ErrorInfo, SweepError};

/// KPI quartet reported for one aggregation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardKpis {
    /// Sustainability score.
    pub sustainability: f64,
    /// Self sufficiency score.
    pub self_sufficiency: f64,
    /// Net load score.
    pub netload: f64,
    /// Cost score.
    pub costs: f64,
}

/// Dashboard KPI block covering every aggregation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardResults {
    /// Neighbourhood level KPIs.
    pub local: DashboardKpis,
    /// District level KPIs.
    pub intermediate: DashboardKpis,
    /// Country level KPIs.
    pub national: DashboardKpis,
}

impl DashboardResults {
    /// Flattens the block into `(level, kpi, value)` triples in a stable order.
    pub fn rows(&self) -> Vec<(&'static str, &'static str, f64)> {
        let mut rows = Vec::with_capacity(12);
        for (level, kpis) in [
            ("local", &self.local),
            ("intermediate", &self.intermediate),
            ("national", &self.national),
        ] {
            rows.push((level, "sustainability", kpis.sustainability));
            rows.push((level, "self_sufficiency", kpis.self_sufficiency));
            rows.push((level, "netload", kpis.netload));
            rows.push((level, "costs", kpis.costs));
        }
        rows
    }
}

/// Cost benefit block carried by successful score responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostBenefitResults {
    /// Two-level `group -> item -> value` aggregate view.
    pub overview: BTreeMap<String, BTreeMap<String, f64>>,
    /// Three-level `subgroup -> group -> item -> value` breakdown.
    pub detail: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

/// Successful scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreSuccess {
    /// Scenario payload echoed by the endpoint.
    pub scenario: Value,
    /// Dashboard KPI block.
    pub dashboard_results: DashboardResults,
    /// Cost benefit block.
    pub cost_benefit_results: CostBenefitResults,
}

/// Failure payload reported by the scoring endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFailure {
    /// Human readable failure description.
    pub error_msg: String,
    /// Scenario payload echoed by the endpoint.
    pub scenario: Value,
    /// Simulation diagnostic payload, when the backend produced one.
    #[serde(default)]
    pub anylogic_outcomes: Option<Value>,
}

/// Classified outcome for one submitted run point.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    /// The endpoint scored the point.
    Success(ScoreSuccess),
    /// The endpoint rejected the point; the sweep records it and continues.
    Failure(ScoreFailure),
}

/// Classifies a raw reply by its transport status before validating shape.
///
/// A 200-class status selects the strict success schema where missing or
/// extra fields are violations; any other status selects the failure schema.
/// A body matching neither expectation is a schema error, never silently
/// downgraded to a recorded failure.
pub fn classify_reply(status: u16, body: &str) -> Result<PointOutcome, SweepError> {
    if (200..300).contains(&status) {
        let success: ScoreSuccess = serde_json::from_str(body).map_err(|err| {
            SweepError::Schema(
                ErrorInfo::new(
                    "reply-success-schema",
                    "2xx reply does not match the score schema",
                )
                .with_context("status", status.to_string())
                .with_hint(err.to_string()),
            )
        })?;
        Ok(PointOutcome::Success(success))
    } else {
        let failure: ScoreFailure = serde_json::from_str(body).map_err(|err| {
            SweepError::Schema(
                ErrorInfo::new(
                    "reply-failure-schema",
                    "non-2xx reply does not match the failure schema",
                )
                .with_context("status", status.to_string())
                .with_hint(err.to_string()),
            )
        })?;
        Ok(PointOutcome::Failure(failure))
    }
}
