//! Failure taxonomy for a single optimization run.

use thiserror::Error;

/// Any failure of the remote model call. Authentication, transport and
/// provider-side errors are deliberately not told apart.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ModelError {
    message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The model's reply could not be turned into a score set.
/// Keeps the unprocessed reply so it can be shown to the user.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct ParseError {
    reason: String,
    raw: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The response exactly as the model returned it.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Please enter your API key.")]
    MissingCredential,

    #[error("Model request failed: {0}")]
    Model(#[from] ModelError),

    #[error("Error parsing AI response: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to build prompt: {0}")]
    Prompt(String),
}

impl RunError {
    /// The raw model reply, for errors that have one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            RunError::Parse(e) => Some(e.raw()),
            _ => None,
        }
    }
}
