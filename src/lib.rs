// src/lib.rs

//! Internal library for roadmap-optimizer – not published on crates.io

pub mod app_controller;
pub mod common;
pub mod engine;
pub mod ui;

// Re-export a narrow, testable API surface
pub use engine::{
    client::{ContentGenerator, GeminiClient},
    config::{OptimizerConfig, OptimizerConfigBuilder},
    error::{ModelError, ParseError, RunError},
    input::{RunConfig, parse_features},
    model::{FeatureScore, ScoreSet},
    parser::parse_response,
    prompt::PromptBuilder,
    session::{OptimizerSession, RunOutcome, run_pipeline},
};
