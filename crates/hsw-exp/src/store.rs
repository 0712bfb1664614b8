use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use hsw_core::errors::{ErrorInfo, SweepError};
use hsw_core::tables::{CostBenefitRow, ErrorRow, InputRow, ResultRow};
use hsw_core::{ElementBinding, PointOutcome};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// Artefact folders and accumulators for one experiment run.
///
/// Scenario and diagnostic payloads hit disk as each point is recorded, so
/// they survive a crash; the four flat tables accumulate in memory until
/// [`RunStore::finalize`] writes them in one pass.
#[derive(Debug)]
pub struct RunStore {
    run_dir: PathBuf,
    scenario_dir: PathBuf,
    anylogic_dir: PathBuf,
    inputs: Vec<InputRow>,
    results: Vec<ResultRow>,
    cost_benefit: Vec<CostBenefitRow>,
    errors: IndexMap<String, String>,
}

impl RunStore {
    /// Creates the `{root}/{title}/{timestamp}/` layout for a new run.
    ///
    /// The timestamp is taken once here; every artefact of the run lands
    /// under the same folder.
    pub fn initiate(root: &Path, title: &str) -> Result<Self, SweepError> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let run_dir = root.join(title).join(stamp);
        let scenario_dir = run_dir.join("scenario");
        let anylogic_dir = run_dir.join("anylogic");
        for dir in [&scenario_dir, &anylogic_dir] {
            fs::create_dir_all(dir).map_err(|err| {
                SweepError::Storage(
                    ErrorInfo::new("store-mkdir", err.to_string())
                        .with_context("path", dir.display().to_string()),
                )
            })?;
        }
        Ok(Self {
            run_dir,
            scenario_dir,
            anylogic_dir,
            inputs: Vec::new(),
            results: Vec::new(),
            cost_benefit: Vec::new(),
            errors: IndexMap::new(),
        })
    }

    /// Directory holding every artefact of this run.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Records one classified run point and returns its fresh id.
    ///
    /// Input rows and the scenario payload are written for both outcome
    /// kinds; KPI and cost benefit rows only for successes, the error entry
    /// and diagnostic payload only for failures.
    pub fn record(
        &mut self,
        outcome: &PointOutcome,
        elements: &[ElementBinding],
    ) -> Result<String, SweepError> {
        let run_point_id = Uuid::new_v4().to_string();
        for element in elements {
            self.inputs.push(InputRow {
                run_point_id: run_point_id.clone(),
                parameter_id: element.interactive_element,
                value: element.value.to_string(),
            });
        }
        match outcome {
            PointOutcome::Success(success) => {
                write_json(
                    &self.scenario_dir.join(format!("{run_point_id}.json")),
                    &success.scenario,
                )?;
                for (level, kpi, value) in success.dashboard_results.rows() {
                    self.results.push(ResultRow {
                        run_point_id: run_point_id.clone(),
                        level: level.to_string(),
                        kpi: kpi.to_string(),
                        value,
                    });
                }
                self.cost_benefit.push(CostBenefitRow {
                    run_point_id: run_point_id.clone(),
                    overview: encode_cell(&success.cost_benefit_results.overview)?,
                    detail: encode_cell(&success.cost_benefit_results.detail)?,
                });
            }
            PointOutcome::Failure(failure) => {
                write_json(
                    &self.scenario_dir.join(format!("{run_point_id}.json")),
                    &failure.scenario,
                )?;
                if let Some(outcomes) = &failure.anylogic_outcomes {
                    write_json(
                        &self.anylogic_dir.join(format!("{run_point_id}.json")),
                        outcomes,
                    )?;
                }
                self.errors
                    .insert(run_point_id.clone(), failure.error_msg.clone());
            }
        }
        Ok(run_point_id)
    }

    /// Writes the four flat tables and seals the run.
    ///
    /// Returns the run directory. Consuming the store is what makes a
    /// finalized run immutable.
    pub fn finalize(self) -> Result<PathBuf, SweepError> {
        write_table(
            &self.run_dir.join("inputs.csv"),
            &["run_point_id", "parameter_id", "value"],
            &self.inputs,
        )?;
        write_table(
            &self.run_dir.join("results.csv"),
            &["run_point_id", "level", "kpi", "value"],
            &self.results,
        )?;
        write_table(
            &self.run_dir.join("cost_benefit.csv"),
            &["run_point_id", "overview", "detail"],
            &self.cost_benefit,
        )?;
        let error_rows: Vec<ErrorRow> = self
            .errors
            .iter()
            .map(|(run_point_id, error_msg)| ErrorRow {
                run_point_id: run_point_id.clone(),
                error_msg: error_msg.clone(),
            })
            .collect();
        write_table(
            &self.run_dir.join("errors.csv"),
            &["run_point_id", "error_msg"],
            &error_rows,
        )?;
        Ok(self.run_dir)
    }
}

/// Writes one flat table with an explicit header row.
///
/// The header is written even when no rows were recorded, so every run
/// carries all four tables.
fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<(), SweepError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|err| wrap_table("table-open", path, err))?;
    writer
        .write_record(headers)
        .map_err(|err| wrap_table("table-header", path, err))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| wrap_table("table-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_table("table-flush", path, err.into()))?;
    Ok(())
}

fn wrap_table(code: &str, path: &Path, err: csv::Error) -> SweepError {
    SweepError::Storage(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SweepError> {
    let json = serde_json::to_string_pretty(value).map_err(|err| {
        SweepError::Storage(
            ErrorInfo::new("point-serialize", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    fs::write(path, json).map_err(|err| {
        SweepError::Storage(
            ErrorInfo::new("point-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Canonical JSON encoding for the nested cost benefit cells.
fn encode_cell<T: Serialize>(value: &T) -> Result<String, SweepError> {
    serde_json::to_string(value).map_err(|err| {
        SweepError::Storage(ErrorInfo::new("cost-benefit-encode", err.to_string()))
    })
}
