//! Turns a goal and a feature list into the instruction sent to the model.

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use crate::engine::error::RunError;
use crate::ui::template::{BuiltinTemplateSource, TemplateSource, handlebars_setup, render_template};

const TEMPLATE_NAME: &str = "rice";

/// Data handed to the prompt template.
#[derive(Debug, Serialize)]
pub struct PromptContext<'a> {
    pub goal: &'a str,
    pub features: &'a [String],
    pub feature_count: usize,
}

/// A registered prompt template, reusable across runs.
pub struct PromptBuilder {
    handlebars: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new(template: &str) -> Result<Self> {
        Ok(Self {
            handlebars: handlebars_setup(template, TEMPLATE_NAME)?,
        })
    }

    pub fn builtin() -> Result<Self> {
        let (content, _) = BuiltinTemplateSource.load()?;
        Self::new(&content)
    }

    /// Feature text is passed through untouched, including anything that
    /// reads like an instruction to the model.
    pub fn build(&self, goal: &str, features: &[String]) -> Result<String, RunError> {
        let ctx = PromptContext {
            goal,
            features,
            feature_count: features.len(),
        };
        let data = serde_json::to_value(&ctx).map_err(|e| RunError::Prompt(e.to_string()))?;
        render_template(&self.handlebars, TEMPLATE_NAME, &data)
            .map_err(|e| RunError::Prompt(e.to_string()))
    }
}
