use std::collections::HashMap;

use pretty_assertions::assert_eq;
use salonbook_api::config::ApiConfig;
use tracing::Level;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/salonbook")]))
        .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.default_service_minutes, 15);
}

#[test]
fn test_config_overrides() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/salonbook"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "https://book.example.com, ,https://admin.example.com"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("DEFAULT_SERVICE_MINUTES", "45"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "https://book.example.com".to_string(),
            "https://admin.example.com".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.default_service_minutes, 45);
}

#[test]
fn test_config_requires_database_url() {
    assert!(ApiConfig::from_lookup(lookup(&[])).is_err());
}

#[test]
fn test_config_rejects_bad_numbers() {
    let base = ("DATABASE_URL", "postgres://localhost/salonbook");

    assert!(ApiConfig::from_lookup(lookup(&[base, ("API_PORT", "http")])).is_err());
    assert!(ApiConfig::from_lookup(lookup(&[base, ("DEFAULT_SERVICE_MINUTES", "0")])).is_err());
    assert!(ApiConfig::from_lookup(lookup(&[base, ("DEFAULT_SERVICE_MINUTES", "-15")])).is_err());
}

#[test]
fn test_config_rejects_service_longer_than_a_day() {
    let base = ("DATABASE_URL", "postgres://localhost/salonbook");

    let err = ApiConfig::from_lookup(lookup(&[base, ("DEFAULT_SERVICE_MINUTES", "5000")]))
        .unwrap_err();
    assert!(err.to_string().contains("DEFAULT_SERVICE_MINUTES"));

    let config =
        ApiConfig::from_lookup(lookup(&[base, ("DEFAULT_SERVICE_MINUTES", "1440")])).unwrap();
    assert_eq!(config.default_service_minutes, 1440);
}
