//! Interactive element model and the expansion rules for swept elements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SweepError};

/// Relative tolerance used when checking that a step divides its range.
const STEP_TOLERANCE: f64 = 1e-9;

/// Concrete value submitted for an interactive element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    /// Numeric slider-style value.
    Number(f64),
    /// Symbolic option value.
    Text(String),
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::Number(value) => write!(f, "{value}"),
            ElementValue::Text(value) => f.write_str(value),
        }
    }
}

/// One interactive element bound to a concrete value, as posted upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBinding {
    /// Upstream identifier of the interactive element.
    pub interactive_element: i64,
    /// Value submitted for the element.
    pub value: ElementValue,
}

/// Element pinned to a single value for every run point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixedElement {
    /// Numeric element pinned to one value.
    Continuous {
        /// Upstream identifier of the element.
        id: i64,
        /// Pinned numeric value.
        value: f64,
    },
    /// Symbolic element pinned to one option.
    Discrete {
        /// Upstream identifier of the element.
        id: i64,
        /// Pinned option.
        value: String,
    },
}

impl FixedElement {
    /// Upstream identifier of the element.
    pub fn id(&self) -> i64 {
        match self {
            FixedElement::Continuous { id, .. } | FixedElement::Discrete { id, .. } => *id,
        }
    }

    /// Wire binding for the pinned value.
    pub fn binding(&self) -> ElementBinding {
        match self {
            FixedElement::Continuous { id, value } => ElementBinding {
                interactive_element: *id,
                value: ElementValue::Number(*value),
            },
            FixedElement::Discrete { id, value } => ElementBinding {
                interactive_element: *id,
                value: ElementValue::Text(value.clone()),
            },
        }
    }
}

/// Element swept across an ordered list of candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepElement {
    /// Numeric range swept from `lower_bound` to `upper_bound` inclusive.
    Continuous {
        /// Upstream identifier of the element.
        id: i64,
        /// First value submitted for the element.
        lower_bound: f64,
        /// Last value submitted for the element.
        upper_bound: f64,
        /// Increment between consecutive values. Must evenly divide the range.
        step: f64,
    },
    /// Symbolic element swept across an explicit option list.
    Discrete {
        /// Upstream identifier of the element.
        id: i64,
        /// Options submitted in declaration order.
        options: Vec<String>,
    },
}

impl SweepElement {
    /// Upstream identifier of the element.
    pub fn id(&self) -> i64 {
        match self {
            SweepElement::Continuous { id, .. } | SweepElement::Discrete { id, .. } => *id,
        }
    }

    /// Checks the range constraints without materialising candidates.
    pub fn validate(&self) -> Result<(), SweepError> {
        if let SweepElement::Continuous {
            id,
            lower_bound,
            upper_bound,
            step,
        } = self
        {
            continuous_steps(*id, *lower_bound, *upper_bound, *step)?;
        }
        Ok(())
    }

    /// Expands the element into its ordered candidate bindings.
    ///
    /// Continuous candidates are computed as `lower_bound + k * step` so a
    /// long sweep does not accumulate rounding drift.
    pub fn expand(&self) -> Result<Vec<ElementBinding>, SweepError> {
        match self {
            SweepElement::Discrete { id, options } => Ok(options
                .iter()
                .map(|option| ElementBinding {
                    interactive_element: *id,
                    value: ElementValue::Text(option.clone()),
                })
                .collect()),
            SweepElement::Continuous {
                id,
                lower_bound,
                upper_bound,
                step,
            } => {
                let steps = continuous_steps(*id, *lower_bound, *upper_bound, *step)?;
                Ok((0..=steps)
                    .map(|k| ElementBinding {
                        interactive_element: *id,
                        value: ElementValue::Number(lower_bound + k as f64 * step),
                    })
                    .collect())
            }
        }
    }
}

fn continuous_steps(id: i64, lower: f64, upper: f64, step: f64) -> Result<usize, SweepError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SweepError::Config(
            ErrorInfo::new("element-step", "step must be a positive finite number")
                .with_context("id", id.to_string())
                .with_context("step", step.to_string()),
        ));
    }
    if !lower.is_finite() || !upper.is_finite() || upper < lower {
        return Err(SweepError::Config(
            ErrorInfo::new("element-range", "sweep range must be finite with upper_bound >= lower_bound")
                .with_context("id", id.to_string())
                .with_context("lower_bound", lower.to_string())
                .with_context("upper_bound", upper.to_string()),
        ));
    }
    let span = upper - lower;
    let steps = (span / step).round();
    if (span - steps * step).abs() > STEP_TOLERANCE * step.max(1.0) {
        return Err(SweepError::Config(
            ErrorInfo::new("element-step", "step does not evenly divide the sweep range")
                .with_context("id", id.to_string())
                .with_context("lower_bound", lower.to_string())
                .with_context("upper_bound", upper.to_string())
                .with_context("step", step.to_string())
                .with_hint("pick a step so the range is a whole number of increments"),
        ));
    }
    Ok(steps as usize)
}
