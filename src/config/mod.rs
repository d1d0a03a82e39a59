use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML config for the CLI. Every field may be omitted;
/// command-line flags take precedence over file values.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Path to the JSON song catalog.
    pub catalog: Option<PathBuf>,
    /// Chords the user already knows, in any accepted spelling.
    pub known_chords: Option<Vec<String>>,
    /// User handle recorded on stored recommendations.
    pub user: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
