// ABOUTME: Health probe route reporting service identity and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "ok" or "degraded"
    pub status: &'static str,
    /// Service name
    pub service: &'static str,
    /// Service version
    pub version: &'static str,
    /// Database reachability: "connected" or "unreachable"
    pub database: &'static str,
}

/// Health probe routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle the health probe
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let database_ok = resources.database.ping().await.is_ok();

        let body = HealthResponse {
            status: if database_ok { "ok" } else { "degraded" },
            service: "quarters-server",
            version: env!("CARGO_PKG_VERSION"),
            database: if database_ok {
                "connected"
            } else {
                "unreachable"
            },
        };

        let status = if database_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        (status, Json(body)).into_response()
    }
}
