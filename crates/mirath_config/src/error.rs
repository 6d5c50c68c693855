//! Error types for configuration loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    Io(String),
    /// The config file is not valid JSON for [`DistributionConfig`].
    ///
    /// [`DistributionConfig`]: crate::DistributionConfig
    Parse(String),
    /// An environment variable holds an unusable value.
    Env(String),
    /// Values parsed but are out of range.
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config read error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Env(msg) => write!(f, "environment error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
