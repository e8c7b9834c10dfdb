// ABOUTME: Unit route handlers: CRUD with eager-loaded tenants on reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreateUnitRequest, UpdateUnitRequest},
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

/// Unit management routes
pub struct UnitRoutes;

impl UnitRoutes {
    /// Create all unit routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/units", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/api/units/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all units with tenants
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let units = resources
            .database
            .list_units()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(units)).into_response())
    }

    /// Handle fetching one unit with tenants
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .get_unit_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Unit"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle creating a unit
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateUnitRequest>,
    ) -> Result<Response, AppError> {
        if request.unit_number.trim().is_empty() {
            return Err(AppError::missing_field("unit_number"));
        }

        let unit = resources
            .database
            .create_unit(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(unit_id = %unit.id, address_id = %unit.address_id, "unit created");

        let detail = resources
            .database
            .get_unit_detail(unit.id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::internal("created unit not found on re-fetch"))?;

        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle updating a unit
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateUnitRequest>,
    ) -> Result<Response, AppError> {
        let unit = resources
            .database
            .update_unit(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Unit"))?;

        Ok((StatusCode::OK, Json(unit)).into_response())
    }

    /// Handle deleting a unit and its dependent records
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_unit(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Unit"));
        }

        info!(unit_id = %id, "unit deleted with cascade");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
