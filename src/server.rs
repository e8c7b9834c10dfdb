// ABOUTME: HTTP server assembly: shared request state, router construction, serve loop
// ABOUTME: Applies CORS and trace layers around the merged resource routers

//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Quarters Property Software

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::external::payments::PaymentsClient;
use crate::middleware::cors::setup_cors;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every route handler
pub struct ServerResources {
    /// Persistence gateway
    pub database: Database,
    /// Runtime configuration
    pub config: Arc<ServerConfig>,
    /// Payments provider client; present when a secret key is configured.
    /// No request path calls it.
    pub payments: Option<PaymentsClient>,
}

impl ServerResources {
    /// Bundle the database and configuration into shared request state
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let payments = config
            .payments
            .secret_key
            .as_ref()
            .map(|key| PaymentsClient::new(key.clone()));

        Self {
            database,
            config,
            payments,
        }
    }
}

/// The Quarters HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server around shared resources
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router with middleware layers applied
    pub fn router(&self) -> Router {
        routes::api_routes(self.resources.clone())
            .layer(setup_cors(&self.resources.config))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if binding fails or the server loop exits abnormally.
    pub async fn run(&self) -> Result<()> {
        let addr = format!(
            "{}:{}",
            self.resources.config.host, self.resources.config.http_port
        );
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("listening on {addr}");

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
