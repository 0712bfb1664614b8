//! Experiment orchestration for holon scenario sweeps: configuration,
//! parameter space enumeration, submission and on-disk persistence.

mod client;
mod config;
mod run;
mod space;
mod store;

pub use client::{RawReply, ScoreClient, SCORE_ENDPOINT};
pub use config::{load_config, ExperimentConfig, InteractiveInputs, ScenarioId};
pub use run::{Experiment, RunReport};
pub use space::SweepSpace;
pub use store::RunStore;
