// ABOUTME: Main library entry point for the Quarters property management API
// ABOUTME: Exposes REST endpoints for properties, units, tenants, and ledger data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

#![deny(unsafe_code)]

//! # Quarters Server
//!
//! A REST API backend for property management: properties with their
//! addresses, units, tenants, owners, associations, a minimal ledger,
//! photos, maintenance tickets, subscriptions, and portfolios.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: serde-derived entity and payload structs
//! - **Database**: SQLite persistence gateway over an sqlx connection pool
//! - **Routes**: one axum router per REST resource
//! - **Config**: environment-based configuration management
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use quarters_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Quarters configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration management and environment parsing
pub mod config;

/// SQLite persistence gateway and per-entity data access
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// External service clients (payments provider)
pub mod external;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware (CORS policy)
pub mod middleware;

/// Common data models for property management entities
pub mod models;

/// `HTTP` route handlers, one module per REST resource
pub mod routes;

/// HTTP server assembly and shared request state
pub mod server;
