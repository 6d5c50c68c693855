//! Loading configuration from files on disk.

use std::path::PathBuf;

use mirath_config::{ConfigError, DistributionConfig};

fn scratch(name: &str, body: &str) -> PathBuf {
    let file = format!("mirath_config_{}_{name}.json", std::process::id());
    let path = std::env::temp_dir().join(file);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_full_file() {
    let path = scratch(
        "full",
        r#"{
            "spouseRadd": true,
            "maxDenominator": 360,
            "percentDecimals": 4,
            "currencyCode": "MYR"
        }"#,
    );
    let c = DistributionConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(
        c,
        DistributionConfig::default()
            .with_spouse_radd(true)
            .with_max_denominator(360)
            .with_percent_decimals(4)
            .with_currency_code("MYR")
    );
}

#[test]
fn missing_file_is_io_error() {
    let err = DistributionConfig::from_json_file("/nonexistent/mirath.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "{err}");
}

#[test]
fn file_then_lookup_precedence() {
    let path = scratch("layered", r#"{"percentDecimals": 3, "currencyCode": "GBP"}"#);
    let c = DistributionConfig::from_json_file(&path)
        .unwrap()
        .merge_lookup(|k| (k == "MIRATH_CURRENCY").then(|| "QAR".to_string()))
        .unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(c.percent_decimals, 3);
    assert_eq!(c.currency_code, "QAR");
}

#[test]
fn serializes_camel_case() {
    let json = serde_json::to_string(&DistributionConfig::default()).unwrap();
    assert!(json.contains("\"spouseRadd\":false"), "{json}");
    assert!(json.contains("\"maxDenominator\":10000"), "{json}");
}
