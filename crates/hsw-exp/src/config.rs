use std::fs;
use std::path::Path;

use hsw_core::errors::{ErrorInfo, SweepError};
use hsw_core::{ElementBinding, FixedElement, SweepElement};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scenario identifier, accepted either as a number or as a symbolic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioId {
    Numeric(i64),
    Named(String),
}

/// Base and swept interactive elements of an experiment.
///
/// Both mappings keep their YAML declaration order; that order fixes the
/// submitted element sequence and the combination enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InteractiveInputs {
    #[serde(default)]
    pub base: Option<IndexMap<String, FixedElement>>,
    #[serde(default)]
    pub sweep: Option<IndexMap<String, SweepElement>>,
}

impl InteractiveInputs {
    /// Bindings for the pinned elements, in declaration order.
    pub fn base_bindings(&self) -> Vec<ElementBinding> {
        self.base
            .iter()
            .flat_map(|base| base.values())
            .map(FixedElement::binding)
            .collect()
    }
}

/// Full experiment definition, normally loaded from a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Scenario the run points are scored against.
    pub scenario_id: ScenarioId,
    /// Experiment title; names the artefact folder under the output root.
    pub title: String,
    /// Free-form description recorded for operators.
    #[serde(default)]
    pub description: String,
    /// Base URL of the scoring service.
    pub base_url: String,
    #[serde(default)]
    pub interactive_inputs: InteractiveInputs,
    /// Ask the service to bypass its response cache.
    #[serde(default = "default_true")]
    pub disable_cache: bool,
    /// Keep diagnostic logging enabled on the service side.
    #[serde(default = "default_true")]
    pub enable_sentry_logging: bool,
}

fn default_true() -> bool {
    true
}

impl ExperimentConfig {
    /// Checks every element constraint before any remote call is made.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.title.is_empty() {
            return Err(SweepError::Config(
                ErrorInfo::new("config-title", "experiment title must not be empty")
                    .with_hint("the title names the artefact folder under the output root"),
            ));
        }
        if self.base_url.is_empty() {
            return Err(SweepError::Config(ErrorInfo::new(
                "config-base-url",
                "base_url must not be empty",
            )));
        }
        if let Some(sweep) = &self.interactive_inputs.sweep {
            for element in sweep.values() {
                element.validate()?;
            }
        }
        Ok(())
    }
}

/// Loads and validates an experiment definition from a YAML file.
pub fn load_config(path: &Path) -> Result<ExperimentConfig, SweepError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        SweepError::Config(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let config: ExperimentConfig = serde_yaml::from_str(&contents).map_err(|err| {
        SweepError::Config(
            ErrorInfo::new("config-parse", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    config.validate()?;
    Ok(config)
}
