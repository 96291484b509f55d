//! Locating, registering and rendering the Handlebars prompt template.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use handlebars::{Handlebars, no_escape};
use sha2::{Digest, Sha256};

use crate::engine::config_file::APP_NAME;

pub const BUILTIN_HASH: &str = "builtin";

/// A trait for sources that can provide template content.
pub trait TemplateSource {
    /// Loads the template content and its hash.
    fn load(&self) -> Result<(Cow<'static, str>, String)>;
}

pub struct FileTemplateSource {
    pub candidates: Vec<PathBuf>,
}

impl TemplateSource for FileTemplateSource {
    fn load(&self) -> Result<(Cow<'static, str>, String)> {
        for path in &self.candidates {
            if path.exists() {
                return read_template(path);
            }
        }
        Err(anyhow!("No template file found in candidate paths."))
    }
}

pub struct BuiltinTemplateSource;

impl TemplateSource for BuiltinTemplateSource {
    fn load(&self) -> Result<(Cow<'static, str>, String)> {
        Ok((
            include_str!("../../rice_prompt.hbs").into(),
            BUILTIN_HASH.into(),
        ))
    }
}

/// Hashes a string using SHA256 and returns a hex string.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

fn read_template(path: &Path) -> Result<(Cow<'static, str>, String)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;
    let hash = hash_content(&content);
    Ok((content.into(), hash))
}

/// Where a user-wide template override is looked up.
pub fn user_template_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join(APP_NAME)
        .join("prompt.hbs")
}

/// Finds the prompt template: `--template`, then the user config dir, then
/// the built-in one. Returns the content and its SHA256 hash.
pub fn resolve_template(tpl_arg: &Option<PathBuf>) -> Result<(Cow<'static, str>, String)> {
    if let Some(path) = tpl_arg {
        return read_template(path);
    }

    let file_source = FileTemplateSource {
        candidates: vec![user_template_path()],
    };

    if let Ok(result) = file_source.load() {
        return Ok(result);
    }

    BuiltinTemplateSource.load()
}

/// Short label for logs and the TUI header.
pub fn describe_template(hash: &str) -> String {
    if hash == BUILTIN_HASH {
        "built-in".to_string()
    } else {
        format!("custom ({})", &hash[..hash.len().min(12)])
    }
}

/// Set up the Handlebars template engine.
pub fn handlebars_setup<'a>(template_str: &str, template_name: &str) -> Result<Handlebars<'a>> {
    let mut handlebars = Handlebars::new();
    // Feature names go to the model verbatim.
    handlebars.register_escape_fn(no_escape);

    handlebars
        .register_template_string(template_name, template_str)
        .map_err(|e| anyhow::anyhow!("Failed to register template: {}", e))?;

    Ok(handlebars)
}

/// Renders the template with the provided data.
pub fn render_template(
    handlebars: &Handlebars,
    template_name: &str,
    data: &serde_json::Value,
) -> Result<String> {
    let rendered = handlebars
        .render(template_name, data)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;
    Ok(rendered.trim().to_string())
}
