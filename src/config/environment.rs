// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management for production deployment

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database location
const DEFAULT_DATABASE_PATH: &str = "./data/quarters.db";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for deployment-dependent behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            bail!("PostgreSQL URLs are not supported by this build; use a sqlite: URL");
        }

        if s.starts_with("sqlite:") {
            let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
            if path_str == ":memory:" {
                Ok(DatabaseUrl::Memory)
            } else {
                Ok(DatabaseUrl::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else {
            // Fallback: treat as SQLite file path
            Ok(DatabaseUrl::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    pub fn to_connection_string(&self) -> String {
        match self {
            DatabaseUrl::SQLite { path } => format!("sqlite:{}", path.display()),
            DatabaseUrl::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        matches!(self, DatabaseUrl::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        DatabaseUrl::SQLite {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind host
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Payments provider settings
    pub payments: PaymentsConfig,
    /// Seed sample data at boot when the database is empty
    pub seed_on_boot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or in-memory)
    pub url: DatabaseUrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or "*" for any
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    /// Secret key for the payments provider; the client is constructed at
    /// boot but no request path calls the provider
    pub secret_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is not a valid port number or the
    /// database URL cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid HTTP_PORT '{value}': {e}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let log_level = env::var("RUST_LOG")
            .map(|value| LogLevel::from_str_or_default(&value))
            .unwrap_or_default();

        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let database_url = match env::var("DATABASE_URL") {
            Ok(value) => DatabaseUrl::parse_url(&value)?,
            Err(_) => DatabaseUrl::default(),
        };

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let secret_key = env::var("PAYMENTS_PROVIDER_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let seed_on_boot = env::var("SEED_ON_BOOT")
            .map(|value| value != "false" && value != "0")
            .unwrap_or(true);

        Ok(Self {
            http_port,
            host,
            log_level,
            environment,
            database: DatabaseConfig { url: database_url },
            cors: CorsConfig { allowed_origins },
            payments: PaymentsConfig { secret_key },
            seed_on_boot,
        })
    }

    /// One-line configuration summary for startup logging
    pub fn summary(&self) -> String {
        format!(
            "http_port={} host={} env={} database={} cors={} payments_key={}",
            self.http_port,
            self.host,
            self.environment,
            self.database.url,
            self.cors.allowed_origins,
            if self.payments.secret_key.is_some() {
                "set"
            } else {
                "unset"
            }
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            host: "127.0.0.1".to_string(),
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
            },
            cors: CorsConfig {
                allowed_origins: "*".to_string(),
            },
            payments: PaymentsConfig { secret_key: None },
            seed_on_boot: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());

        let file = DatabaseUrl::parse_url("sqlite:./data/quarters.db").unwrap();
        assert_eq!(file.to_connection_string(), "sqlite:./data/quarters.db");

        // Bare paths fall back to SQLite
        let bare = DatabaseUrl::parse_url("./quarters.db").unwrap();
        assert_eq!(bare.to_connection_string(), "sqlite:./quarters.db");

        assert!(DatabaseUrl::parse_url("postgres://localhost/app").is_err());
    }

    #[test]
    fn test_log_level_fallback() {
        assert_eq!(LogLevel::from_str_or_default("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }

    #[test]
    fn test_environment_fallback() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }
}
