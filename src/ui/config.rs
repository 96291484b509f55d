use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::engine::{
    config::{OptimizerConfig, OptimizerConfigBuilder},
    config_file::ConfigFile,
};
use crate::ui::cli::Cli;

/// Merges CLI flags over the config file over built-in defaults.
/// `features_text` is the already-read `--features` input, if any.
pub fn build_config_builder(
    args: &Cli,
    cfg_file: &ConfigFile,
    features_text: Option<String>,
) -> OptimizerConfigBuilder {
    let mut b = OptimizerConfigBuilder::default();
    b.output_format(args.output_format);

    if let Some(model) = args.model.clone().or_else(|| cfg_file.model.clone()) {
        b.model(model);
    }
    if let Some(url) = args.base_url.clone().or_else(|| cfg_file.base_url.clone()) {
        b.base_url(url);
    }
    if let Some(goal) = args.goal.clone().or_else(|| cfg_file.goal.clone()) {
        b.goal(goal);
    }
    if let Some(text) = features_text.or_else(|| cfg_file.features.as_ref().map(|f| f.join("\n")))
    {
        b.features_text(text);
    }
    if let Some(scale) = args.bubble_scale.or(cfg_file.bubble_scale) {
        b.bubble_scale(scale);
    }
    b.template(args.template.clone().or_else(|| cfg_file.template.clone()));
    b
}

pub fn build_config(args: &Cli, cfg_file: &ConfigFile) -> Result<OptimizerConfig> {
    let features_text = match &args.features_file {
        Some(path) => Some(read_features_file(path)?),
        None => None,
    };
    build_config_builder(args, cfg_file, features_text)
        .build()
        .context("Failed to build configuration")
}

/// Reads the raw feature list; "-" means stdin.
pub fn read_features_file(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read features from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read features file: {}", path.display()))
}

#[cfg(feature = "interactive")]
pub fn prompt_for_credential() -> Result<String> {
    use inquire::{Password, PasswordDisplayMode};

    let answer = Password::new("Gemini API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Used for this run only; never saved. Esc to skip.")
        .prompt();
    credential_answer(answer)
}

/// Esc leaves the key empty so the run reports the missing key; any other
/// prompt failure (Ctrl-C included) is an error of its own.
#[cfg(feature = "interactive")]
fn credential_answer(answer: Result<String, inquire::InquireError>) -> Result<String> {
    match answer {
        Ok(key) => Ok(key),
        Err(inquire::InquireError::OperationCanceled) => Ok(String::new()),
        Err(e) => Err(e).context("Failed to read API key"),
    }
}

#[cfg(all(test, feature = "interactive"))]
mod tests {
    use super::*;
    use inquire::InquireError;

    #[test]
    fn typed_key_is_returned() {
        assert_eq!(credential_answer(Ok("abc".into())).unwrap(), "abc");
    }

    #[test]
    fn escape_gives_an_empty_key() {
        let key = credential_answer(Err(InquireError::OperationCanceled)).unwrap();
        assert!(key.is_empty());
    }

    #[test]
    fn interrupt_is_reported_as_a_prompt_failure() {
        let err = credential_answer(Err(InquireError::OperationInterrupted)).unwrap_err();
        assert!(err.to_string().contains("Failed to read API key"));
    }

    #[test]
    fn terminal_failure_is_reported_as_a_prompt_failure() {
        let err = credential_answer(Err(InquireError::NotTTY)).unwrap_err();
        assert!(err.to_string().contains("Failed to read API key"));
    }
}
