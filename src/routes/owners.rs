// ABOUTME: Owner route handlers: plain CRUD against the owners table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreateOwnerRequest, UpdateOwnerRequest},
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

/// Owner management routes
pub struct OwnerRoutes;

impl OwnerRoutes {
    /// Create all owner routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/owners",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/owners/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all owners
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let owners = resources
            .database
            .list_owners()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(owners)).into_response())
    }

    /// Handle fetching one owner
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let owner = resources
            .database
            .get_owner(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Owner"))?;

        Ok((StatusCode::OK, Json(owner)).into_response())
    }

    /// Handle creating an owner
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateOwnerRequest>,
    ) -> Result<Response, AppError> {
        if request.email.trim().is_empty() {
            return Err(AppError::missing_field("email"));
        }

        let owner = resources
            .database
            .create_owner(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(owner_id = %owner.id, property_id = %owner.property_id, "owner created");

        Ok((StatusCode::CREATED, Json(owner)).into_response())
    }

    /// Handle updating an owner
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateOwnerRequest>,
    ) -> Result<Response, AppError> {
        let owner = resources
            .database
            .update_owner(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Owner"))?;

        Ok((StatusCode::OK, Json(owner)).into_response())
    }

    /// Handle deleting an owner
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_owner(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Owner"));
        }

        info!(owner_id = %id, "owner deleted");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
