//! Error types for distribution requests.

use std::error::Error;
use std::fmt::{Display, Formatter};

use mirath_config::ConfigError;
use mirath_heirs::CompositionError;
use mirath_rational::RationalError;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    Composition(CompositionError),
    Rational(RationalError),
    Config(ConfigError),
    InvalidEstate(&'static str),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Composition(e) => write!(f, "invalid composition: {e}"),
            Self::Rational(e) => write!(f, "arithmetic error: {e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::InvalidEstate(msg) => write!(f, "invalid estate value: {msg}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Composition(e) => Some(e),
            Self::Rational(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidEstate(_) => None,
        }
    }
}

impl From<CompositionError> for EngineError {
    fn from(e: CompositionError) -> Self {
        Self::Composition(e)
    }
}

impl From<RationalError> for EngineError {
    fn from(e: RationalError) -> Self {
        Self::Rational(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
