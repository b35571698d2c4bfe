use crate::analyzer::AnalyzerParams;
use crate::preprocess::ImageVariant;
use crate::types::Hand;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What the demo prints to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub json_out: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
}

/// Demo run description read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub variant: ImageVariant,
    #[serde(default)]
    pub hand: Option<Hand>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: AnalyzerParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Read an [`AnalyzerParams`] file; missing fields keep their defaults.
pub fn load_params(path: &Path) -> Result<AnalyzerParams, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read params {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse params {}: {e}", path.display()))
}
