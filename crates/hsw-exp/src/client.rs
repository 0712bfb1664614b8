use hsw_core::errors::{ErrorInfo, SweepError};
use hsw_core::ElementBinding;
use serde::Serialize;

use crate::config::{ExperimentConfig, ScenarioId};

/// Path of the scoring endpoint, joined onto the configured base URL.
pub const SCORE_ENDPOINT: &str = "/wt/api/nextjs/v2/holon/";

/// Raw reply captured from the scoring endpoint before classification.
#[derive(Debug, Clone)]
pub struct RawReply {
    /// HTTP status code of the reply.
    pub status: u16,
    /// Unparsed response body.
    pub body: String,
}

#[derive(Serialize)]
struct ScoreRequest<'a> {
    interactive_elements: &'a [ElementBinding],
    scenario: &'a ScenarioId,
}

/// Blocking client submitting run points to the scoring endpoint.
///
/// The cache bypass travels as a `caching` cookie and the diagnostic logging
/// switch as a `sentry_logging` query parameter; both live on the client,
/// never in ambient state.
#[derive(Clone)]
pub struct ScoreClient {
    agent: ureq::Agent,
    url: String,
    scenario_id: ScenarioId,
    disable_cache: bool,
    enable_sentry_logging: bool,
}

impl ScoreClient {
    /// Builds a client from the experiment configuration.
    pub fn new(config: &ExperimentConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                SCORE_ENDPOINT
            ),
            scenario_id: config.scenario_id.clone(),
            disable_cache: config.disable_cache,
            enable_sentry_logging: config.enable_sentry_logging,
        }
    }

    /// URL run points are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submits one element list and returns the raw status and body.
    ///
    /// No timeout is applied; a stalled backend stalls the sweep. Non-2xx
    /// statuses are returned like any other reply so the caller can classify
    /// them, while connection-level failures surface as transport errors.
    pub fn submit(&self, elements: &[ElementBinding]) -> Result<RawReply, SweepError> {
        let caching = if self.disable_cache { "false" } else { "true" };
        let sentry = if self.enable_sentry_logging {
            "true"
        } else {
            "false"
        };
        let request = self
            .agent
            .post(&self.url)
            .set("Cookie", &format!("caching={caching}"))
            .query("sentry_logging", sentry);
        let payload = ScoreRequest {
            interactive_elements: elements,
            scenario: &self.scenario_id,
        };
        match request.send_json(&payload) {
            Ok(response) => read_reply(response),
            Err(ureq::Error::Status(_, response)) => read_reply(response),
            Err(ureq::Error::Transport(err)) => Err(SweepError::Transport(
                ErrorInfo::new("submit-transport", "scoring endpoint unreachable")
                    .with_context("url", self.url.clone())
                    .with_hint(err.to_string()),
            )),
        }
    }
}

fn read_reply(response: ureq::Response) -> Result<RawReply, SweepError> {
    let status = response.status();
    let body = response.into_string().map_err(|err| {
        SweepError::Transport(
            ErrorInfo::new("submit-body", "failed to read the response body")
                .with_context("status", status.to_string())
                .with_hint(err.to_string()),
        )
    })?;
    Ok(RawReply { status, body })
}
