//! The remote generative model.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::engine::error::ModelError;

/// Anything that can answer a prompt with text.
pub trait ContentGenerator {
    /// One blocking request; returns the complete reply.
    fn generate(&self, credential: &str, prompt: &str) -> Result<String, ModelError>;
}

/// Google Gemini `generateContent` over HTTPS.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl ContentGenerator for GeminiClient {
    fn generate(&self, credential: &str, prompt: &str) -> Result<String, ModelError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        log::info!("Sending prompt to {} ({} chars)", self.model, prompt.len());
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .map_err(|e| ModelError::new(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ModelError::new(e.to_string()))?;
        log::debug!("Provider answered {status} with {} bytes", text.len());

        if !status.is_success() {
            return Err(ModelError::new(provider_error_text(status.as_u16(), &text)));
        }
        extract_text(&text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pulls the reply text out of a successful `generateContent` body by
/// joining the text parts of the first candidate.
pub fn extract_text(body: &str) -> Result<String, ModelError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::new(format!("unexpected response from provider: {e}")))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ModelError::new(format!("prompt was blocked: {reason}")));
    }

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(ModelError::new("provider returned no candidates"));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(ModelError::new(format!(
            "provider returned no text (finish reason: {reason})"
        )));
    }
    Ok(text)
}

/// The provider's own message for a failed call, falling back to the body.
pub fn provider_error_text(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => format!("{status}: {}", env.error.message),
        Err(_) if body.trim().is_empty() => format!("{status}: empty response"),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\""},{"text":":1}]"}]},"finishReason":"STOP"},{"content":{"parts":[{"text":"ignored"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), r#"[{"a":1}]"#);
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let err = extract_text(body).unwrap_err();
        assert!(err.message().contains("SAFETY"));
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let body = r#"{"promptFeedback":{"blockReason":"OTHER"}}"#;
        assert!(extract_text(body).unwrap_err().message().contains("OTHER"));
    }

    #[test]
    fn provider_message_is_preferred() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            provider_error_text(400, body),
            "400: API key not valid. Please pass a valid API key."
        );
        assert_eq!(provider_error_text(502, "Bad Gateway\n"), "502: Bad Gateway");
        assert_eq!(provider_error_text(500, ""), "500: empty response");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let c = GeminiClient::new("http://localhost:1/v1beta/", "gemini-2.5-flash").unwrap();
        assert_eq!(
            c.endpoint(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
