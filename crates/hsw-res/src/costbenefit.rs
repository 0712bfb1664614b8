//! Projections over the nested cost benefit cells.

use std::collections::BTreeMap;

use hsw_core::errors::{ErrorInfo, SweepError};
use hsw_core::tables::CostBenefitRow;
use serde::de::DeserializeOwned;

use crate::loader::RunTables;

/// Overview projection: group name to named cost and benefit totals.
pub type OverviewMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Detail projection for one sub-group: item name to value breakdown.
pub type DetailMap = BTreeMap<String, BTreeMap<String, f64>>;

impl RunTables {
    /// Overview cost benefit groups recorded for one run point.
    ///
    /// Returns `None` when the point has no cost benefit row, which is the
    /// normal state for rejected points.
    pub fn cost_benefit_overview(
        &self,
        run_point_id: &str,
    ) -> Result<Option<OverviewMap>, SweepError> {
        match self.cost_benefit_row(run_point_id) {
            Some(row) => Ok(Some(parse_nested(&row.overview)?)),
            None => Ok(None),
        }
    }

    /// Detail breakdown recorded for one run point, keyed by sub-group.
    ///
    /// Returns `None` when the point has no cost benefit row or its cell
    /// carries no such sub-group.
    pub fn cost_benefit_detail(
        &self,
        run_point_id: &str,
        subgroup: &str,
    ) -> Result<Option<DetailMap>, SweepError> {
        let row = match self.cost_benefit_row(run_point_id) {
            Some(row) => row,
            None => return Ok(None),
        };
        let full: BTreeMap<String, DetailMap> = parse_nested(&row.detail)?;
        Ok(full.get(subgroup).cloned())
    }

    fn cost_benefit_row(&self, run_point_id: &str) -> Option<&CostBenefitRow> {
        self.cost_benefit
            .iter()
            .find(|row| row.run_point_id == run_point_id)
    }
}

/// Parses one nested cell, repairing legacy single-quoted encodings.
///
/// Cells written by this engine are plain JSON and parse on the first
/// attempt. Older stores carry Python-repr text; those get one retry after
/// quote normalisation. The error reports the original parse failure.
fn parse_nested<T: DeserializeOwned>(cell: &str) -> Result<T, SweepError> {
    match serde_json::from_str(cell) {
        Ok(value) => Ok(value),
        Err(first) => serde_json::from_str(&normalize_quotes(cell)).map_err(|_| {
            SweepError::Query(
                ErrorInfo::new("cost-benefit-parse", "cost benefit cell is not valid JSON")
                    .with_hint(first.to_string()),
            )
        }),
    }
}

/// Rewrites single-quoted structure text into JSON quoting.
///
/// Only quote characters are rewritten, and only outside double-quoted
/// runs, so numeric literals and quoted content pass through untouched.
fn normalize_quotes(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = cell.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                // Python escapes apostrophes inside single-quoted text;
                // JSON double-quoted text wants them bare.
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '\'' if !in_double => {
                in_single = !in_single;
                out.push('"');
            }
            '"' if in_single => {
                out.push('\\');
                out.push('"');
            }
            '"' => {
                in_double = !in_double;
                out.push('"');
            }
            _ => out.push(ch),
        }
    }
    out
}
