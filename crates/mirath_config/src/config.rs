//! Distribution settings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ConfigError;

pub const ENV_SPOUSE_RADD: &str = "MIRATH_SPOUSE_RADD";
pub const ENV_MAX_DENOMINATOR: &str = "MIRATH_MAX_DENOMINATOR";
pub const ENV_PERCENT_DECIMALS: &str = "MIRATH_PERCENT_DECIMALS";
pub const ENV_CURRENCY: &str = "MIRATH_CURRENCY";

pub const DEFAULT_MAX_DENOMINATOR: u32 = 10_000;
pub const DEFAULT_PERCENT_DECIMALS: u8 = 2;
pub const MAX_PERCENT_DECIMALS: u8 = 10;

fn default_max_denominator() -> u32 {
    DEFAULT_MAX_DENOMINATOR
}

fn default_percent_decimals() -> u8 {
    DEFAULT_PERCENT_DECIMALS
}

fn default_currency_code() -> String {
    "USD".to_string()
}

/// Knobs around the rule engine. None of them changes a statutory share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfig {
    /// Return the remainder to the spouse when no other heir can take it.
    #[serde(default)]
    pub spouse_radd: bool,
    /// Largest denominator accepted when turning decimal input into a fraction.
    #[serde(default = "default_max_denominator")]
    pub max_denominator: u32,
    /// Decimal places kept in percentages and amounts.
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: u8,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            spouse_radd: false,
            max_denominator: DEFAULT_MAX_DENOMINATOR,
            percent_decimals: DEFAULT_PERCENT_DECIMALS,
            currency_code: default_currency_code(),
        }
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env(format!("{name}: expected a boolean, got {raw:?}"))),
    }
}

fn parse_num<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Env(format!("{name}: expected a number, got {raw:?}")))
}

impl DistributionConfig {
    /// Finish a builder chain.
    pub fn build(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_denominator == 0 {
            return Err(ConfigError::Invalid("maxDenominator must be at least 1"));
        }
        if self.percent_decimals > MAX_PERCENT_DECIMALS {
            return Err(ConfigError::Invalid("percentDecimals must be at most 10"));
        }
        if self.currency_code.trim().is_empty() {
            return Err(ConfigError::Invalid("currencyCode must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("loading distribution config");
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Defaults overlaid with any `MIRATH_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().merge_env()
    }

    /// Overlay the `MIRATH_*` variables that are set onto `self`.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from `lookup`, keyed by the `MIRATH_*` names.
    #[instrument(skip_all)]
    pub fn merge_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SPOUSE_RADD) {
            self.spouse_radd = parse_bool(ENV_SPOUSE_RADD, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_DENOMINATOR) {
            self.max_denominator = parse_num(ENV_MAX_DENOMINATOR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PERCENT_DECIMALS) {
            self.percent_decimals = parse_num(ENV_PERCENT_DECIMALS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CURRENCY) {
            self.currency_code = raw.trim().to_string();
        }
        debug!(config = ?self, "environment applied");
        self.validate()?;
        Ok(self)
    }

    pub fn with_spouse_radd(mut self, enabled: bool) -> Self {
        self.spouse_radd = enabled;
        self
    }

    pub fn with_max_denominator(mut self, max: u32) -> Self {
        self.max_denominator = max;
        self
    }

    pub fn with_percent_decimals(mut self, decimals: u8) -> Self {
        self.percent_decimals = decimals;
        self
    }

    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// Round to [`percent_decimals`](Self::percent_decimals) places.
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(i32::from(self.percent_decimals));
        (value * scale).round() / scale
    }

    pub fn format_percent(&self, percent: f64) -> String {
        format!("{:.*}%", usize::from(self.percent_decimals), percent)
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!(
            "{} {:.*}",
            self.currency_code,
            usize::from(self.percent_decimals),
            amount
        )
    }
}
