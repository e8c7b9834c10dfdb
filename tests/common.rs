// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, router, and fixture creation helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Quarters Property Software
#![allow(dead_code)]

//! Shared test utilities for `quarters_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use axum::{body::Body, http::Request, Router};
use quarters_server::{
    config::environment::ServerConfig,
    database::Database,
    models::{
        AddressPayload, CreatePropertyRequest, CreateTenantRequest, CreateUnitRequest, Property,
        PropertyAddress, Tenant, Unit,
    },
    server::{HttpServer, ServerResources},
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Build the application router over a fresh in-memory database
pub async fn build_test_app() -> Result<(Router, Database)> {
    let database = create_test_database().await?;
    let config = Arc::new(ServerConfig::default());
    let resources = Arc::new(ServerResources::new(database.clone(), config));
    let app = HttpServer::new(resources).router();
    Ok((app, database))
}

/// Create a property with one address
pub async fn create_test_property(database: &Database) -> Result<(Property, PropertyAddress)> {
    let property = database
        .create_property(&CreatePropertyRequest {
            name: "Test Property".to_string(),
            property_type: "multi_family".to_string(),
            status: "active".to_string(),
            value: 500_000.0,
            addresses: Some(vec![AddressPayload {
                id: None,
                street: "1 Test St".to_string(),
                city: "Testville".to_string(),
                state: "TS".to_string(),
                postal_code: "00001".to_string(),
            }]),
            photos: None,
        })
        .await?;

    let address = database
        .list_addresses(property.id)
        .await?
        .and_then(|addresses| addresses.into_iter().next())
        .ok_or_else(|| anyhow::anyhow!("test property has no address"))?;

    Ok((property, address))
}

/// Create a unit under the given address
pub async fn create_test_unit(database: &Database, address: &PropertyAddress) -> Result<Unit> {
    database
        .create_unit(&CreateUnitRequest {
            address_id: address.id,
            unit_number: "1A".to_string(),
            rent: 1200.0,
            status: "occupied".to_string(),
        })
        .await
}

/// Create a tenant in the given unit
pub async fn create_test_tenant(database: &Database, unit: &Unit) -> Result<Tenant> {
    database
        .create_tenant(&CreateTenantRequest {
            unit_id: unit.id,
            first_name: "Test".to_string(),
            last_name: "Tenant".to_string(),
            email: "test.tenant@example.com".to_string(),
            phone: None,
            lease_start: None,
            lease_end: None,
            rent: 1200.0,
        })
        .await
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Build a bodyless request
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
