// ABOUTME: Portfolio route handlers: CRUD plus property attach/detach sub-resource
// ABOUTME: Attaching an already-attached property yields 409
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{AttachPropertyRequest, CreatePortfolioRequest, UpdatePortfolioRequest},
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Portfolio management routes
pub struct PortfolioRoutes;

impl PortfolioRoutes {
    /// Create all portfolio routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/portfolios",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/portfolios/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/portfolios/:id/properties",
                post(Self::handle_attach),
            )
            .route(
                "/api/portfolios/:id/properties/:property_id",
                delete(Self::handle_detach),
            )
            .with_state(resources)
    }

    /// Handle listing all portfolios with member properties
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let portfolios = resources
            .database
            .list_portfolios()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(portfolios)).into_response())
    }

    /// Handle fetching one portfolio with member properties
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .database
            .get_portfolio_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Portfolio"))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle creating a portfolio
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePortfolioRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let portfolio = resources
            .database
            .create_portfolio(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(portfolio_id = %portfolio.id, name = %portfolio.name, "portfolio created");

        let detail = resources
            .database
            .get_portfolio_detail(portfolio.id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::internal("created portfolio not found on re-fetch"))?;

        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle updating a portfolio
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdatePortfolioRequest>,
    ) -> Result<Response, AppError> {
        let portfolio = resources
            .database
            .update_portfolio(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Portfolio"))?;

        Ok((StatusCode::OK, Json(portfolio)).into_response())
    }

    /// Handle deleting a portfolio and its memberships
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_portfolio(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Portfolio"));
        }

        info!(portfolio_id = %id, "portfolio deleted");

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle attaching a property to a portfolio
    async fn handle_attach(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<AttachPropertyRequest>,
    ) -> Result<Response, AppError> {
        let attached = resources
            .database
            .attach_property(id, request.property_id)
            .await
            .map_err(AppError::from_persistence)?;

        if !attached {
            return Err(AppError::not_found("Portfolio"));
        }

        info!(
            portfolio_id = %id,
            property_id = %request.property_id,
            "property attached to portfolio"
        );

        let detail = resources
            .database
            .get_portfolio_detail(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Portfolio"))?;

        Ok((StatusCode::CREATED, Json(detail)).into_response())
    }

    /// Handle detaching a property from a portfolio
    async fn handle_detach(
        State(resources): State<Arc<ServerResources>>,
        Path((id, property_id)): Path<(Uuid, Uuid)>,
    ) -> Result<Response, AppError> {
        let detached = resources
            .database
            .detach_property(id, property_id)
            .await
            .map_err(AppError::from_persistence)?;

        if !detached {
            return Err(AppError::not_found("Portfolio membership"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
