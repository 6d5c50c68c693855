//! Runtime settings for the distribution engine.
//!
//! Settings come from defaults, a JSON file, and `MIRATH_*` environment
//! variables, in that order of precedence from lowest to highest.

pub mod config;
pub mod error;

pub use config::{
    DEFAULT_MAX_DENOMINATOR, DEFAULT_PERCENT_DECIMALS, DistributionConfig, ENV_CURRENCY,
    ENV_MAX_DENOMINATOR, ENV_PERCENT_DECIMALS, ENV_SPOUSE_RADD, MAX_PERCENT_DECIMALS,
};
pub use error::ConfigError;
