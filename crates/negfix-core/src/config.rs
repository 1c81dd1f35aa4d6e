//! Pipeline configuration loading
//!
//! Defaults for the conversion flags are read from a YAML file found in one of
//! the well-known locations below. Command-line flags override these values.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::NormalizeOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NEGFIX_CONFIG";

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["negfix.yml", "negfix.yaml"];

/// Complete configuration file structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub defaults: PipelineDefaults,
}

/// Default pipeline parameter values.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineDefaults {
    pub invert: bool,
    pub normalize: bool,
    pub border_percent: u32,
    pub threshold_upper: u32,
    pub threshold_lower: u32,
    /// Extra gamma profiles merged over the built-ins.
    pub profiles_file: Option<PathBuf>,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        let normalize = NormalizeOptions::default();
        Self {
            invert: true,
            normalize: true,
            border_percent: normalize.border_percent,
            threshold_upper: normalize.threshold_upper,
            threshold_lower: normalize.threshold_lower,
            profiles_file: None,
        }
    }
}

impl PipelineDefaults {
    pub(crate) fn sanitize(&mut self) {
        self.border_percent = self.border_percent.min(100);
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            border_percent: self.border_percent,
            threshold_upper: self.threshold_upper,
            threshold_lower: self.threshold_lower,
        }
    }
}

/// Loaded configuration, its source path, and warnings gathered on the way.
#[derive(Debug)]
pub struct PipelineConfigHandle {
    pub config: PipelineConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl PipelineConfigHandle {
    fn with_config(config: PipelineConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }

    /// Log where the config came from along with any warnings.
    pub fn log_usage(&self) {
        match &self.source {
            Some(source) => log::debug!("Loaded pipeline config from {}", source.display()),
            None => log::debug!("Using built-in pipeline defaults"),
        }
        for warning in &self.warnings {
            log::warn!("Config warning: {}", warning);
        }
    }
}

/// Load the pipeline configuration from the first usable candidate.
///
/// Unreadable or malformed candidates are recorded as warnings and skipped.
pub fn load_pipeline_config(custom_path: Option<&Path>) -> PipelineConfigHandle {
    load_from_candidates(get_config_candidates(custom_path))
}

fn load_from_candidates(candidates: Vec<PathBuf>) -> PipelineConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<PipelineConfig>(&contents) {
                Ok(mut config) => {
                    config.defaults.sanitize();
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return PipelineConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse pipeline config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read pipeline config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    PipelineConfigHandle::with_config(PipelineConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("negfix").join(name));
        }
    }

    candidates
}
