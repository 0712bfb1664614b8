//! Directory listing and flat-table loading for finished runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use hsw_core::errors::{ErrorInfo, SweepError};
use hsw_core::tables::{CostBenefitRow, ErrorRow, InputRow, ResultRow};
use serde::de::DeserializeOwned;
use tracing::warn;

/// The four flat tables of one finished run.
#[derive(Debug, Clone, Default)]
pub struct RunTables {
    /// Submitted element values, one row per element per run point.
    pub inputs: Vec<InputRow>,
    /// Dashboard KPI values for scored run points.
    pub results: Vec<ResultRow>,
    /// Nested cost benefit payloads for scored run points.
    pub cost_benefit: Vec<CostBenefitRow>,
    /// Upstream error messages for rejected run points.
    pub errors: Vec<ErrorRow>,
}

/// Reader over the artefact tree the run store writes.
///
/// The tree is append-only from the reader's point of view; a loader can be
/// kept around and re-queried as new runs land under the root.
#[derive(Debug, Clone)]
pub struct ResultLoader {
    root: PathBuf,
}

impl ResultLoader {
    /// Creates a loader over the output root runs were written under.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Experiment titles present under the root, sorted by name.
    pub fn list_experiments(&self) -> Result<Vec<String>, SweepError> {
        list_dirs(&self.root)
    }

    /// Run folder timestamps recorded for one experiment, sorted.
    ///
    /// The timestamp format sorts lexicographically in chronological order,
    /// so the last entry is the most recent run.
    pub fn list_runs(&self, experiment: &str) -> Result<Vec<String>, SweepError> {
        list_dirs(&self.root.join(experiment))
    }

    /// Loads the four flat tables of one run.
    ///
    /// A missing table file yields an empty table; a missing run directory
    /// is an error.
    pub fn load_run(&self, experiment: &str, run: &str) -> Result<RunTables, SweepError> {
        let run_dir = self.root.join(experiment).join(run);
        if !run_dir.is_dir() {
            return Err(SweepError::Query(
                ErrorInfo::new("run-missing", "no run recorded at this path")
                    .with_context("path", run_dir.display().to_string()),
            ));
        }
        Ok(RunTables {
            inputs: read_table(&run_dir.join("inputs.csv"))?,
            results: read_table(&run_dir.join("results.csv"))?,
            cost_benefit: read_table(&run_dir.join("cost_benefit.csv"))?,
            errors: read_table(&run_dir.join("errors.csv"))?,
        })
    }

    /// Raw bytes of the scenario payload stored for one run point.
    pub fn scenario_json(
        &self,
        experiment: &str,
        run: &str,
        run_point_id: &str,
    ) -> Result<Vec<u8>, SweepError> {
        let path = self
            .root
            .join(experiment)
            .join(run)
            .join("scenario")
            .join(format!("{run_point_id}.json"));
        fs::read(&path).map_err(|err| {
            SweepError::Query(
                ErrorInfo::new("scenario-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Renders a run folder timestamp as a human readable label.
///
/// `20230115_143059` becomes `2023-01-15 - 14:30:59`.
pub fn run_label(stamp: &str) -> Result<String, SweepError> {
    let parsed = NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").map_err(|err| {
        SweepError::Query(
            ErrorInfo::new("run-label", "run folder name is not a timestamp")
                .with_context("stamp", stamp.to_string())
                .with_hint(err.to_string()),
        )
    })?;
    Ok(parsed.format("%Y-%m-%d - %H:%M:%S").to_string())
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SweepError> {
    if !path.is_file() {
        warn!(path = %path.display(), "table file missing, substituting an empty table");
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        SweepError::Query(
            ErrorInfo::new("table-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record.map_err(|err| {
            SweepError::Query(
                ErrorInfo::new("table-record", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?);
    }
    Ok(rows)
}

fn list_dirs(dir: &Path) -> Result<Vec<String>, SweepError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|err| {
        SweepError::Query(
            ErrorInfo::new("list-dir", err.to_string())
                .with_context("path", dir.display().to_string()),
        )
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            SweepError::Query(
                ErrorInfo::new("list-entry", err.to_string())
                    .with_context("path", dir.display().to_string()),
            )
        })?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
