//! `szs-eval.toml` settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use szs_archive::ArchiveLayout;
use szs_core::{ExtractorConfig, GroundTruthConfig, SzsError, PROBLEMS_KEY};
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = "szs-eval.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Solver configurations to evaluate, in report order.
    pub solvers: Vec<String>,
    pub extractor: ExtractorConfig,
    pub truth: GroundTruthConfig,
    pub layout: ArchiveLayout,
    pub progress: ProgressSettings,
    pub out_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solvers: Vec::new(),
            extractor: ExtractorConfig::default(),
            truth: GroundTruthConfig::default(),
            layout: ArchiveLayout::default(),
            progress: ProgressSettings::default(),
            out_dir: PathBuf::from("results"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Log progress every this many reports (0 disables).
    pub interval: u64,
    /// Expected number of reports, for the completion estimate (0 = unknown).
    pub expected: u64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            interval: 1000,
            expected: 0,
        }
    }
}

/// Values given on the command line, applied over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub solvers: Vec<String>,
    pub topics: Vec<String>,
    pub out_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or from `szs-eval.toml` in the working
    /// directory when no path is given. Only an explicit path must exist.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read settings: {:?}", config_path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid settings file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line values; non-empty lists replace the file's lists.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if !overrides.solvers.is_empty() {
            self.solvers = overrides.solvers;
        }
        if !overrides.topics.is_empty() {
            self.extractor.topics = overrides.topics;
        }
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        self
    }

    pub fn validate(&self) -> szs_core::Result<()> {
        let mut errors = Vec::new();
        if self.solvers.is_empty() {
            errors.push("at least one solver must be configured");
        }
        if self.extractor.status_marker.is_empty() {
            errors.push("extractor.status_marker must not be empty");
        }
        if self.extractor.topics.iter().any(|t| t == PROBLEMS_KEY) {
            errors.push("extractor.topics must not contain the reserved name \"problems\"");
        }
        if self.truth.marker.is_empty() {
            errors.push("truth.marker must not be empty");
        }
        if self.layout.solver_depth == self.layout.problem_depth {
            errors.push("layout.solver_depth and layout.problem_depth must differ");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SzsError::InvalidConfig(errors.join("; ")))
        }
    }
}
