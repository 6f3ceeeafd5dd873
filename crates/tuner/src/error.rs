//! Error types for the tuner

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunerError {
    /// The match output contained no `Score of A vs B` line.
    #[error("no match score found in tournament output")]
    MissingScore,
    #[error("could not parse match score from {line:?}")]
    ParseScore { line: String },
    #[error("match outcome {0} is outside [0, 1]")]
    InvalidOutcome(f64),
    #[error("failed to launch {command}: {source}")]
    ProcessSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("match did not finish within {0:?}")]
    ProcessTimeout(Duration),
    #[error("invalid sampling range [{lower}, {upper}]")]
    InvalidRange { lower: f64, upper: f64 },
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl TunerError {
    /// True for failures that mean an iteration produced no usable outcome.
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingScore
                | Self::ParseScore { .. }
                | Self::InvalidOutcome(_)
                | Self::ProcessSpawn { .. }
                | Self::ProcessTimeout(_)
        )
    }
}

impl From<serde_json::Error> for TunerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}

impl From<toml::de::Error> for TunerError {
    fn from(value: toml::de::Error) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<toml::ser::Error> for TunerError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TunerError>;
