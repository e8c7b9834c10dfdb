// ABOUTME: Property address sub-resource route handlers
// ABOUTME: Nested list/create under a property; get/update/delete by address id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreateAddressRequest, UpdateAddressRequest},
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

/// Property address routes
pub struct AddressRoutes;

impl AddressRoutes {
    /// Create all address routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/properties/:id/addresses",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/properties/addresses/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing a property's addresses
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(property_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let addresses = resources
            .database
            .list_addresses(property_id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Property"))?;

        Ok((StatusCode::OK, Json(addresses)).into_response())
    }

    /// Handle adding one address to a property
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Path(property_id): Path<Uuid>,
        Json(request): Json<CreateAddressRequest>,
    ) -> Result<Response, AppError> {
        if request.street.trim().is_empty() {
            return Err(AppError::missing_field("street"));
        }

        let address = resources
            .database
            .create_address(property_id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Property"))?;

        info!(address_id = %address.id, property_id = %property_id, "address created");

        Ok((StatusCode::CREATED, Json(address)).into_response())
    }

    /// Handle fetching one address
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let address = resources
            .database
            .get_address(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Address"))?;

        Ok((StatusCode::OK, Json(address)).into_response())
    }

    /// Handle updating one address
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateAddressRequest>,
    ) -> Result<Response, AppError> {
        let address = resources
            .database
            .update_address(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Address"))?;

        Ok((StatusCode::OK, Json(address)).into_response())
    }

    /// Handle deleting one address and its unit subtree
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_address(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Address"));
        }

        info!(address_id = %id, "address deleted with cascade");

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
