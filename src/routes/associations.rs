// ABOUTME: Association and board member route handlers
// ABOUTME: Association reads eager-load board members; deletes cascade to them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{
        CreateAssociationRequest, CreateBoardMemberRequest, UpdateAssociationRequest,
        UpdateBoardMemberRequest,
    },
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

/// Association and board member routes
pub struct AssociationRoutes;

impl AssociationRoutes {
    /// Create all association and board member routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/associations",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/associations/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/board-members",
                get(Self::handle_list_members).post(Self::handle_create_member),
            )
            .route(
                "/api/board-members/:id",
                get(Self::handle_get_member)
                    .put(Self::handle_update_member)
                    .delete(Self::handle_delete_member),
            )
            .with_state(resources)
    }

    /// Handle listing all associations with board members
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let associations = resources
            .database
            .list_associations()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(associations)).into_response())
    }

    /// Handle fetching one association with board members
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .get_association_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Association"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle creating an association
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateAssociationRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let association = resources
            .database
            .create_association(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(
            association_id = %association.id,
            property_id = %association.property_id,
            "association created"
        );

        Ok((StatusCode::CREATED, Json(association)).into_response())
    }

    /// Handle updating an association
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateAssociationRequest>,
    ) -> Result<Response, AppError> {
        let association = resources
            .database
            .update_association(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Association"))?;

        Ok((StatusCode::OK, Json(association)).into_response())
    }

    /// Handle deleting an association and its board members
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_association(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Association"));
        }

        info!(association_id = %id, "association deleted with cascade");

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle listing all board members
    async fn handle_list_members(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let members = resources
            .database
            .list_board_members()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(members)).into_response())
    }

    /// Handle fetching one board member
    async fn handle_get_member(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let member = resources
            .database
            .get_board_member(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Board member"))?;

        Ok((StatusCode::OK, Json(member)).into_response())
    }

    /// Handle creating a board member
    async fn handle_create_member(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateBoardMemberRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let member = resources
            .database
            .create_board_member(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(
            board_member_id = %member.id,
            association_id = %member.association_id,
            "board member created"
        );

        Ok((StatusCode::CREATED, Json(member)).into_response())
    }

    /// Handle updating a board member
    async fn handle_update_member(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateBoardMemberRequest>,
    ) -> Result<Response, AppError> {
        let member = resources
            .database
            .update_board_member(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Board member"))?;

        Ok((StatusCode::OK, Json(member)).into_response())
    }

    /// Handle deleting a board member
    async fn handle_delete_member(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_board_member(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Board member"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
