// ABOUTME: Maintenance ticket route handlers: CRUD with status transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreateTicketRequest, UpdateTicketRequest},
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

/// Maintenance ticket routes
pub struct MaintenanceRoutes;

impl MaintenanceRoutes {
    /// Create all maintenance routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/maintenance",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/maintenance/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all tickets
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tickets = resources
            .database
            .list_tickets()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(tickets)).into_response())
    }

    /// Handle fetching one ticket
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let ticket = resources
            .database
            .get_ticket(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Maintenance ticket"))?;

        Ok((StatusCode::OK, Json(ticket)).into_response())
    }

    /// Handle opening a ticket
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateTicketRequest>,
    ) -> Result<Response, AppError> {
        if request.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }

        let ticket = resources
            .database
            .create_ticket(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(ticket_id = %ticket.id, unit_id = %ticket.unit_id, "maintenance ticket opened");

        Ok((StatusCode::CREATED, Json(ticket)).into_response())
    }

    /// Handle updating a ticket
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateTicketRequest>,
    ) -> Result<Response, AppError> {
        let ticket = resources
            .database
            .update_ticket(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Maintenance ticket"))?;

        Ok((StatusCode::OK, Json(ticket)).into_response())
    }

    /// Handle deleting a ticket
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_ticket(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Maintenance ticket"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
