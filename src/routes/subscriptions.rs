// ABOUTME: Subscription plan and subscription route handlers, including cancel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{
        CreatePlanRequest, CreateSubscriptionRequest, UpdatePlanRequest,
        UpdateSubscriptionRequest,
    },
    server::ServerResources,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Subscription plan and subscription routes
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create all subscription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/subscription/plans",
                get(Self::handle_list_plans).post(Self::handle_create_plan),
            )
            .route(
                "/api/subscription/plans/:id",
                get(Self::handle_get_plan)
                    .put(Self::handle_update_plan)
                    .delete(Self::handle_delete_plan),
            )
            .route(
                "/api/subscriptions",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/subscriptions/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/api/subscriptions/:id/cancel", post(Self::handle_cancel))
            .with_state(resources)
    }

    // ── Plans ───────────────────────────────────────────────────────────

    async fn handle_list_plans(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let plans = resources
            .database
            .list_plans()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    async fn handle_get_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let plan = resources
            .database
            .get_plan(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Subscription plan"))?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_create_plan(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePlanRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let plan = resources
            .database
            .create_plan(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(plan_id = %plan.id, name = %plan.name, "subscription plan created");

        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn handle_update_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdatePlanRequest>,
    ) -> Result<Response, AppError> {
        let plan = resources
            .database
            .update_plan(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Subscription plan"))?;

        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_delete_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_plan(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Subscription plan"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let subscriptions = resources
            .database
            .list_subscriptions()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(subscriptions)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let subscription = resources
            .database
            .get_subscription(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Subscription"))?;

        Ok((StatusCode::OK, Json(subscription)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateSubscriptionRequest>,
    ) -> Result<Response, AppError> {
        if request.customer_email.trim().is_empty() {
            return Err(AppError::missing_field("customer_email"));
        }

        let subscription = resources
            .database
            .create_subscription(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(
            subscription_id = %subscription.id,
            plan_id = %subscription.plan_id,
            "subscription started"
        );

        Ok((StatusCode::CREATED, Json(subscription)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateSubscriptionRequest>,
    ) -> Result<Response, AppError> {
        let subscription = resources
            .database
            .update_subscription(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Subscription"))?;

        Ok((StatusCode::OK, Json(subscription)).into_response())
    }

    /// Handle cancelling a subscription; idempotent once cancelled
    async fn handle_cancel(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let subscription = resources
            .database
            .cancel_subscription(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Subscription"))?;

        info!(subscription_id = %id, "subscription cancelled");

        Ok((StatusCode::OK, Json(subscription)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_subscription(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Subscription"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
