use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "roadmap-optimizer";

/// Represents the structure of the `config.toml` file.
/// All fields are optional, so users only need to specify what they want to override.
/// There is intentionally no field for the API key.
#[derive(Default, Serialize, Deserialize, Debug, Clone)]
pub struct ConfigFile {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub goal: Option<String>,
    pub features: Option<Vec<String>>,
    pub bubble_scale: Option<f64>,
    pub template: Option<PathBuf>,
}
