use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.api_token.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "globalview/0.1 (dashboard)");
    assert_eq!(cfg.search_debounce_ms, 450);
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_API_BASE_URL", "https://api.example.com/v2/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://api.example.com/v2");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_API_BASE_URL", "/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GLOBALVIEW_API_BASE_URL"),
        "expected InvalidEnvVar(GLOBALVIEW_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_static_token() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_API_TOKEN", "  static-token ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_token.as_deref(), Some("static-token"));
}

#[test]
fn build_app_config_treats_blank_token_as_absent() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_API_TOKEN", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_token.is_none());
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GLOBALVIEW_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GLOBALVIEW_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_search_debounce_invalid() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_SEARCH_DEBOUNCE_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GLOBALVIEW_SEARCH_DEBOUNCE_MS"),
        "expected InvalidEnvVar(GLOBALVIEW_SEARCH_DEBOUNCE_MS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_token() {
    let mut map = HashMap::new();
    map.insert("GLOBALVIEW_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
