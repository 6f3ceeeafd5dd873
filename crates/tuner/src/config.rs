//! Tuning run configuration
//!
//! Loaded from a TOML file; every field falls back to the defaults below,
//! so a file only needs the values it changes. Example:
//!
//! ```toml
//! iterations = 20
//!
//! [sampler]
//! warn_after = 2000
//!
//! [match]
//! working_directory = "./engine"
//! engine_command = "./Avalanche"
//! time_control = "10.0+0.1"
//! games = 100
//!
//! [[variables]]
//! name = "LMRWeight"
//! default = 580.0
//! minval = 100.0
//! maxval = 900.0
//! delta = 260.0
//! apply_factor = 0.45
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TunerError};
use crate::match_runner::MatchConfig;
use crate::sampler::SamplerConfig;
use crate::variable::{validate_variables, VariableSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Number of tuning iterations (one paired match each)
    pub iterations: u32,
    /// Seed for the random source (None = from entropy)
    pub seed: Option<u64>,
    /// Write a JSON report here when the run completes
    pub report_path: Option<PathBuf>,
    pub sampler: SamplerConfig,
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
    pub variables: Vec<VariableSpec>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            seed: None,
            report_path: None,
            sampler: SamplerConfig::default(),
            match_config: MatchConfig::default(),
            variables: vec![
                VariableSpec::new("LMRWeight", 580.0, 100.0, 900.0, 260.0, 0.45),
                VariableSpec::new("LMRBias", 980.0, 100.0, 1500.0, 500.0, 0.4),
            ],
        }
    }
}

impl TunerConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TunerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(TunerError::Config("iterations must be greater than 0".into()));
        }
        if self.sampler.warn_after == 0 {
            return Err(TunerError::Config("sampler.warn_after must be greater than 0".into()));
        }
        if self.sampler.max_attempts == Some(0) {
            return Err(TunerError::Config("sampler.max_attempts must be greater than 0".into()));
        }
        self.match_config.validate()?;
        validate_variables(&self.variables)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
