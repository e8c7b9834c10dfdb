// ABOUTME: Property route handlers including the composite create/update protocol
// ABOUTME: POST and PUT accept nested address and photo lists, applied transactionally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! Property routes
//!
//! Create and update accept the composite payload: the property row plus
//! optional nested `addresses` and `photos` lists. Child lists are diffed
//! against existing rows by id inside one database transaction, and the
//! first entry in submission order is flagged primary.

use crate::{
    errors::AppError,
    models::{CreatePropertyRequest, UpdatePropertyRequest},
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

/// Property management routes
pub struct PropertyRoutes;

impl PropertyRoutes {
    /// Create all property routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/properties",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/properties/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all properties with relations
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let properties = resources
            .database
            .list_properties()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(properties)).into_response())
    }

    /// Handle fetching one property with relations
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .get_property_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Property"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle the composite property create
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePropertyRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let property = resources
            .database
            .create_property(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(property_id = %property.id, name = %property.name, "property created");

        let detail = resources
            .database
            .get_property_detail(property.id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::internal("created property not found on re-fetch"))?;

        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle the composite property update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdatePropertyRequest>,
    ) -> Result<Response, AppError> {
        if let Some(name) = &request.name {
            if name.trim().is_empty() {
                return Err(AppError::missing_field("name"));
            }
        }

        resources
            .database
            .update_property(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Property"))?;

        let detail = resources
            .database
            .get_property_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Property"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle deleting a property and its dependent subtree
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_property(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Property"));
        }

        info!(property_id = %id, "property deleted with cascade");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
