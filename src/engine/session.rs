use std::fmt;

use serde::Serialize;

use crate::engine::{
    client::ContentGenerator,
    config::OptimizerConfig,
    error::RunError,
    input::{RunConfig, redact},
    model::ScoreSet,
    parser::parse_response,
    prompt::PromptBuilder,
};

/// Field values that survive between runs of one interactive session.
/// Nothing else is carried from one run to the next.
#[derive(Clone, Default)]
pub struct OptimizerSession {
    pub goal: String,
    pub credential: String,
    pub features_text: String,
}

/// Everything one successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub goal: String,
    pub features: Vec<String>,
    pub scores: ScoreSet,
    #[serde(skip)]
    pub raw_response: String,
}

impl OptimizerSession {
    pub fn new(
        goal: impl Into<String>,
        credential: impl Into<String>,
        features_text: impl Into<String>,
    ) -> Self {
        Self {
            goal: goal.into(),
            credential: credential.into(),
            features_text: features_text.into(),
        }
    }

    pub fn from_config(config: &OptimizerConfig, credential: impl Into<String>) -> Self {
        Self::new(
            config.goal.clone(),
            credential,
            config.features_text.clone(),
        )
    }

    /// Snapshot of the current fields for a single trigger.
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(&self.goal, &self.credential, &self.features_text)
    }

    pub fn optimize(
        &self,
        client: &dyn ContentGenerator,
        prompt: &PromptBuilder,
    ) -> Result<RunOutcome, RunError> {
        run_pipeline(&self.run_config(), client, prompt)
    }
}

impl fmt::Debug for OptimizerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerSession")
            .field("goal", &self.goal)
            .field("credential", &redact(&self.credential))
            .field("features_text", &self.features_text)
            .finish()
    }
}

/// Collect → build prompt → call model → parse. Stops at the first failure;
/// no step is retried.
pub fn run_pipeline(
    cfg: &RunConfig,
    client: &dyn ContentGenerator,
    prompt: &PromptBuilder,
) -> Result<RunOutcome, RunError> {
    let credential = cfg.require_credential()?;

    let features = cfg.features();
    if features.is_empty() {
        log::warn!("Feature list is empty; asking the model anyway");
    }

    let prompt_text = prompt.build(&cfg.goal, &features)?;
    log::debug!("Prompt:\n{prompt_text}");

    let raw_response = client.generate(credential, &prompt_text)?;
    log::debug!("Raw response:\n{raw_response}");

    let scores = parse_response(&raw_response)?;
    if scores.len() != features.len() {
        log::warn!(
            "Model scored {} records for {} features",
            scores.len(),
            features.len()
        );
    }
    log::info!("Scored {} features for goal {:?}", scores.len(), cfg.goal);

    Ok(RunOutcome {
        goal: cfg.goal.clone(),
        features,
        scores,
        raw_response,
    })
}
