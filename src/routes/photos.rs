// ABOUTME: Photo route handlers: CRUD with parent validation
// ABOUTME: A photo must name exactly one parent, a property or a unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreatePhotoRequest, UpdatePhotoRequest},
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

/// Photo management routes
pub struct PhotoRoutes;

impl PhotoRoutes {
    /// Create all photo routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/photos",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/photos/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all photos
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let photos = resources
            .database
            .list_photos()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(photos)).into_response())
    }

    /// Handle fetching one photo
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let photo = resources
            .database
            .get_photo(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Photo"))?;

        Ok((StatusCode::OK, Json(photo)).into_response())
    }

    /// Handle attaching a photo
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePhotoRequest>,
    ) -> Result<Response, AppError> {
        if request.property_id.is_some() == request.unit_id.is_some() {
            return Err(AppError::invalid_input(
                "exactly one of property_id or unit_id must be set",
            ));
        }
        if request.url.trim().is_empty() {
            return Err(AppError::missing_field("url"));
        }

        let photo = resources
            .database
            .create_photo(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(photo_id = %photo.id, "photo created");

        Ok((StatusCode::CREATED, Json(photo)).into_response())
    }

    /// Handle updating a photo
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdatePhotoRequest>,
    ) -> Result<Response, AppError> {
        let photo = resources
            .database
            .update_photo(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Photo"))?;

        Ok((StatusCode::OK, Json(photo)).into_response())
    }

    /// Handle deleting a photo
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_photo(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Photo"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
