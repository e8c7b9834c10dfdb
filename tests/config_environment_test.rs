// ABOUTME: Integration tests for environment configuration parsing
// ABOUTME: Env-var mutations are serialized to avoid cross-test interference

use quarters_server::config::environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
use serial_test::serial;
use std::env;

fn clear_config_env() {
    for key in [
        "HTTP_PORT",
        "HOST",
        "DATABASE_URL",
        "CORS_ALLOWED_ORIGINS",
        "PAYMENTS_PROVIDER_SECRET_KEY",
        "ENVIRONMENT",
        "SEED_ON_BOOT",
        "RUST_LOG",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_env_is_empty() {
    clear_config_env();

    let config = ServerConfig::from_env().expect("config");

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.environment, Environment::Development);
    assert!(config.payments.secret_key.is_none());
    assert!(config.seed_on_boot);
    assert_eq!(
        config.database.url.to_connection_string(),
        "sqlite:./data/quarters.db"
    );
}

#[test]
#[serial]
fn test_env_overrides_are_applied() {
    clear_config_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://app.example.com");
    env::set_var("PAYMENTS_PROVIDER_SECRET_KEY", "sk_test_123");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SEED_ON_BOOT", "false");

    let config = ServerConfig::from_env().expect("config");

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.host, "0.0.0.0");
    assert!(config.database.url.is_memory());
    assert_eq!(config.cors.allowed_origins, "https://app.example.com");
    assert_eq!(config.payments.secret_key.as_deref(), Some("sk_test_123"));
    assert!(config.environment.is_production());
    assert!(!config.seed_on_boot);

    clear_config_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_config_env();
    env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
}

#[test]
fn test_database_url_round_trip() {
    let url = DatabaseUrl::parse_url("sqlite:./data/app.db").expect("parse");
    assert_eq!(url.to_connection_string(), "sqlite:./data/app.db");
    assert!(!url.is_memory());

    assert!(DatabaseUrl::parse_url("sqlite::memory:")
        .expect("parse")
        .is_memory());
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("TRACE"), LogLevel::Trace);
    assert_eq!(LogLevel::from_str_or_default("unknown"), LogLevel::Info);
    assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
}
