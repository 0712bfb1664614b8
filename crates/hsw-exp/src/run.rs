use std::path::{Path, PathBuf};

use hsw_core::errors::SweepError;
use hsw_core::{classify_reply, ElementBinding, PointOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::ScoreClient;
use crate::config::ExperimentConfig;
use crate::space::SweepSpace;
use crate::store::RunStore;

/// Summary returned to callers after a sweep completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Directory holding the run artefacts.
    pub run_dir: PathBuf,
    /// Run points submitted.
    pub points: usize,
    /// Points the endpoint scored.
    pub succeeded: usize,
    /// Points the endpoint rejected.
    pub failed: usize,
}

/// A validated experiment ready to sweep.
pub struct Experiment {
    config: ExperimentConfig,
    space: SweepSpace,
    client: ScoreClient,
    base: Vec<ElementBinding>,
}

impl Experiment {
    /// Validates the configuration and prepares the parameter space.
    ///
    /// Every element constraint is checked here, so a malformed definition
    /// is rejected before the first remote call.
    pub fn from_config(config: ExperimentConfig) -> Result<Self, SweepError> {
        config.validate()?;
        let space = SweepSpace::new(config.interactive_inputs.sweep.as_ref())?;
        let client = ScoreClient::new(&config);
        let base = config.interactive_inputs.base_bindings();
        Ok(Self {
            config,
            space,
            client,
            base,
        })
    }

    /// Number of run points the sweep will submit.
    pub fn cardinality(&self) -> usize {
        self.space.cardinality()
    }

    /// Submits every run point in order and persists artefacts under `root`.
    ///
    /// Strictly sequential: one submission in flight, classified and
    /// recorded before the next one starts. Consumes the experiment; a
    /// finished run cannot be extended or rerun.
    pub fn run(mut self, root: &Path) -> Result<RunReport, SweepError> {
        let mut store = RunStore::initiate(root, &self.config.title)?;
        info!(
            title = %self.config.title,
            points = self.space.cardinality(),
            run_dir = %store.run_dir().display(),
            "starting sweep"
        );
        let mut points = 0usize;
        let mut succeeded = 0usize;
        let mut failed = 0usize;
        while let Some(combination) = self.space.next_combination() {
            let mut elements = self.base.clone();
            elements.extend(combination);
            let reply = match self.client.submit(&elements) {
                Ok(reply) => reply,
                Err(err) => {
                    flush_after_abort(store);
                    return Err(err);
                }
            };
            let outcome = match classify_reply(reply.status, &reply.body) {
                Ok(outcome) => outcome,
                Err(err) => {
                    flush_after_abort(store);
                    return Err(err);
                }
            };
            let run_point_id = store.record(&outcome, &elements)?;
            points += 1;
            match &outcome {
                PointOutcome::Success(_) => {
                    succeeded += 1;
                    debug!(%run_point_id, status = reply.status, "run point scored");
                }
                PointOutcome::Failure(failure) => {
                    failed += 1;
                    warn!(
                        %run_point_id,
                        status = reply.status,
                        error = %failure.error_msg,
                        "run point rejected"
                    );
                }
            }
        }
        let run_dir = store.finalize()?;
        info!(points, succeeded, failed, "sweep finalized");
        Ok(RunReport {
            run_dir,
            points,
            succeeded,
            failed,
        })
    }
}

/// Best-effort flush so the consolidated tables survive an aborted sweep.
fn flush_after_abort(store: RunStore) {
    if let Err(err) = store.finalize() {
        warn!(error = %err, "failed to flush accumulators while aborting");
    }
}
