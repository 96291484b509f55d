// src/ui/cli.rs

use crate::engine::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

// ~~~ CLI Arguments ~~~
#[derive(Parser, Debug, Clone)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION")
)]
pub struct Cli {
    /// Business goal the features are scored against
    #[clap(short = 'g', long)]
    pub goal: Option<String>,

    /// File with one feature per line ("-" reads stdin)
    #[clap(short = 'f', long = "features", value_name = "FILE")]
    pub features_file: Option<PathBuf>,

    /// Gemini API key. Never written to disk.
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model to ask for scores
    #[clap(short = 'm', long)]
    pub model: Option<String>,

    /// Base URL of the generative language API
    #[clap(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Optional path to a custom Handlebars prompt template
    #[clap(short = 'T', long)]
    pub template: Option<PathBuf>,

    /// Bubble area per point of RICE score
    #[clap(long, value_name = "SCALE")]
    pub bubble_scale: Option<f64>,

    /// Run once and print the results instead of opening the interactive UI
    #[clap(short = 'b', long)]
    pub batch: bool,

    /// Output format for batch mode: table or json
    #[clap(short = 'F', long = "output-format", default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,

    /// Append log records to this file instead of stderr
    #[clap(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
