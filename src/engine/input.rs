//! Collects and normalizes what the user typed for one run.

use std::fmt;

use crate::engine::error::RunError;

/// Splits the feature field into trimmed, non-empty lines, keeping order.
/// Duplicates are kept.
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Inputs for a single optimization request. Built fresh on every trigger
/// and dropped afterwards.
#[derive(Clone)]
pub struct RunConfig {
    pub goal: String,
    pub credential: String,
    pub features_text: String,
}

impl RunConfig {
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

    pub fn features(&self) -> Vec<String> {
        parse_features(&self.features_text)
    }

    /// Returns the credential, or the blocking error if the field is blank.
    pub fn require_credential(&self) -> Result<&str, RunError> {
        let key = self.credential.trim();
        if key.is_empty() {
            Err(RunError::MissingCredential)
        } else {
            Ok(key)
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("goal", &self.goal)
            .field("credential", &redact(&self.credential))
            .field("features_text", &self.features_text)
            .finish()
    }
}

pub(crate) fn redact(secret: &str) -> &'static str {
    if secret.trim().is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
