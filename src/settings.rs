//! Binary settings
//!
//! Loaded from an optional `cutkit.toml` next to the working directory;
//! every field has a default so a missing file just runs the standard
//! configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Parameter library JSON file; seeded on first run when missing
    pub library_path: PathBuf,
    /// Run the assisted pipeline (planner, reviewer, advice)
    pub assisted: bool,
    /// Wall-clock budget per run in seconds
    pub timeout_secs: u64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Population size override
    pub population_size: Option<usize>,
    /// Generation budget override
    pub generations: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from("cutkit-library.json"),
            assisted: true,
            timeout_secs: 120,
            seed: None,
            population_size: None,
            generations: None,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}
