// ABOUTME: Payment route handlers: plain CRUD against the payments table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{CreatePaymentRequest, UpdatePaymentRequest},
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

/// Payment management routes
pub struct PaymentRoutes;

impl PaymentRoutes {
    /// Create all payment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/payments",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/payments/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle listing all payments
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let payments = resources
            .database
            .list_payments()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(payments)).into_response())
    }

    /// Handle fetching one payment
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let payment = resources
            .database
            .get_payment(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Payment"))?;

        Ok((StatusCode::OK, Json(payment)).into_response())
    }

    /// Handle recording a payment
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreatePaymentRequest>,
    ) -> Result<Response, AppError> {
        if request.amount <= 0.0 {
            return Err(AppError::invalid_input("amount must be positive"));
        }

        let payment = resources
            .database
            .create_payment(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(
            payment_id = %payment.id,
            tenant_id = %payment.tenant_id,
            amount = payment.amount,
            "payment recorded"
        );

        Ok((StatusCode::CREATED, Json(payment)).into_response())
    }

    /// Handle updating a payment
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdatePaymentRequest>,
    ) -> Result<Response, AppError> {
        let payment = resources
            .database
            .update_payment(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Payment"))?;

        Ok((StatusCode::OK, Json(payment)).into_response())
    }

    /// Handle deleting a payment
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_payment(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Payment"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
