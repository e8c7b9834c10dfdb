// ABOUTME: Tenant route handlers: plain CRUD against the tenants table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreateTenantRequest, UpdateTenantRequest},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Tenant management routes
pub struct TenantRoutes;

impl TenantRoutes {
    /// Create all tenant routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/tenants",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/tenants/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all tenants
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tenants = resources
            .database
            .list_tenants()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(tenants)).into_response())
    }

    /// Handle fetching one tenant
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let tenant = resources
            .database
            .get_tenant(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Tenant"))?;

        Ok((StatusCode::OK, Json(tenant)).into_response())
    }

    /// Handle creating a tenant
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateTenantRequest>,
    ) -> Result<Response, AppError> {
        if request.email.trim().is_empty() {
            return Err(AppError::missing_field("email"));
        }

        let tenant = resources
            .database
            .create_tenant(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(tenant_id = %tenant.id, unit_id = %tenant.unit_id, "tenant created");

        Ok((StatusCode::CREATED, Json(tenant)).into_response())
    }

    /// Handle updating a tenant
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateTenantRequest>,
    ) -> Result<Response, AppError> {
        let tenant = resources
            .database
            .update_tenant(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Tenant"))?;

        Ok((StatusCode::OK, Json(tenant)).into_response())
    }

    /// Handle deleting a tenant and their payments
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_tenant(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Tenant"));
        }

        info!(tenant_id = %id, "tenant deleted");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
