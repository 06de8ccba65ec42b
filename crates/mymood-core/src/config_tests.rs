//! Config module tests

use std::collections::HashMap;

use crate::config::{API_KEY_ENV, BASE_URL_ENV, Config, DEFAULT_BASE_URL};
use crate::error::Error;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.api_key.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_lookup_uses_defaults_when_unset() {
    let config = Config::from_lookup(lookup(&[]));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.api_key.is_none());
}

#[test]
fn test_from_lookup_reads_variables() {
    let config = Config::from_lookup(lookup(&[
        (BASE_URL_ENV, "http://localhost:8080/api/"),
        (API_KEY_ENV, "secret-key-1234"),
    ]));

    assert_eq!(config.base_url, "http://localhost:8080/api/");
    assert_eq!(config.api_key.as_deref(), Some("secret-key-1234"));
}

#[test]
fn test_empty_api_key_is_unset() {
    let config = Config::from_lookup(lookup(&[(API_KEY_ENV, "  ")]));
    assert!(config.api_key.is_none());
}

#[test]
fn test_invalid_base_url_rejected() {
    let config = Config::from_lookup(lookup(&[(BASE_URL_ENV, "ftp://example.com")]));
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

    let config = Config::default().with_base_url("");
    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
}

#[test]
fn test_redacted_api_key() {
    assert_eq!(Config::default().redacted_api_key(), None);
    assert_eq!(
        Config::default().with_api_key("abc").redacted_api_key(),
        Some("***".to_string())
    );
    assert_eq!(
        Config::default()
            .with_api_key("sk-live-98765")
            .redacted_api_key(),
        Some("***8765".to_string())
    );
}

#[test]
fn test_debug_hides_api_key() {
    let config = Config::default().with_api_key("very-secret-token");
    let debug = format!("{:?}", config);
    assert!(!debug.contains("very-secret-token"));
    assert!(debug.contains("***oken"));
}

#[test]
fn test_override_replaces_invalid_base_url() {
    let config = Config::from_lookup(lookup(&[(BASE_URL_ENV, "garbage")]))
        .with_base_url("https://api.example.com");

    assert_eq!(config.base_url, "https://api.example.com");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_api_key_override_clears_key() {
    let config = Config::from_lookup(lookup(&[(API_KEY_ENV, "env-key-5678")])).with_api_key("");
    assert!(config.api_key.is_none());
    assert_eq!(config.redacted_api_key(), None);

    let config = Config::default().with_api_key("   ");
    assert!(config.api_key.is_none());
}
