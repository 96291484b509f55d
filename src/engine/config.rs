// src/engine/config.rs

use clap::ValueEnum;
use derive_builder::Builder;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GOAL: &str = "Increase User Retention";
pub const DEFAULT_FEATURES: &[&str] = &[
    "Dark Mode",
    "Drone Delivery",
    "Voice Search",
    "One-Click Checkout",
    "Referral Bonus",
];
/// Bubble area per point of `rice_score`.
pub const DEFAULT_BUBBLE_SCALE: f64 = 25.0;

pub fn default_features_text() -> String {
    DEFAULT_FEATURES.join("\n")
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings for the whole session. The credential is never part of it.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(name = "build_internal"))]
pub struct OptimizerConfig {
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    pub model: String,
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,
    #[builder(default = "DEFAULT_GOAL.to_string()")]
    pub goal: String,
    #[builder(default = "default_features_text()")]
    pub features_text: String,
    #[builder(default = "DEFAULT_BUBBLE_SCALE")]
    pub bubble_scale: f64,
    #[builder(default)]
    pub template: Option<PathBuf>,
    #[builder(default)]
    pub output_format: OutputFormat,
}

impl OptimizerConfigBuilder {
    pub fn build(&self) -> Result<OptimizerConfig, OptimizerConfigBuilderError> {
        self.build_internal()
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            goal: DEFAULT_GOAL.to_string(),
            features_text: default_features_text(),
            bubble_scale: DEFAULT_BUBBLE_SCALE,
            template: None,
            output_format: OutputFormat::Table,
        }
    }
}
