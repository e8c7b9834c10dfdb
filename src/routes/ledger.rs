// ABOUTME: Ledger route handlers: account types, accounts, transaction types, transactions
// ABOUTME: Four flat CRUD resources sharing one router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use crate::{
    errors::AppError,
    models::{
        CreateAccountRequest, CreateNamedTypeRequest, CreateTransactionRequest,
        UpdateAccountRequest, UpdateNamedTypeRequest, UpdateTransactionRequest,
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

/// Ledger resource routes
pub struct LedgerRoutes;

impl LedgerRoutes {
    /// Create all ledger routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/account-types",
                get(Self::handle_list_account_types).post(Self::handle_create_account_type),
            )
            .route(
                "/api/account-types/:id",
                get(Self::handle_get_account_type)
                    .put(Self::handle_update_account_type)
                    .delete(Self::handle_delete_account_type),
            )
            .route(
                "/api/accounts",
                get(Self::handle_list_accounts).post(Self::handle_create_account),
            )
            .route(
                "/api/accounts/:id",
                get(Self::handle_get_account)
                    .put(Self::handle_update_account)
                    .delete(Self::handle_delete_account),
            )
            .route(
                "/api/transaction-types",
                get(Self::handle_list_transaction_types).post(Self::handle_create_transaction_type),
            )
            .route(
                "/api/transaction-types/:id",
                get(Self::handle_get_transaction_type)
                    .put(Self::handle_update_transaction_type)
                    .delete(Self::handle_delete_transaction_type),
            )
            .route(
                "/api/transactions",
                get(Self::handle_list_transactions).post(Self::handle_create_transaction),
            )
            .route(
                "/api/transactions/:id",
                get(Self::handle_get_transaction)
                    .put(Self::handle_update_transaction)
                    .delete(Self::handle_delete_transaction),
            )
            .with_state(resources)
    }

    // ── Account types ───────────────────────────────────────────────────

    async fn handle_list_account_types(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let types = resources
            .database
            .list_account_types()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(types)).into_response())
    }

    async fn handle_get_account_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let account_type = resources
            .database
            .get_account_type(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Account type"))?;

        Ok((StatusCode::OK, Json(account_type)).into_response())
    }

    async fn handle_create_account_type(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateNamedTypeRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let account_type = resources
            .database
            .create_account_type(&request)
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::CREATED, Json(account_type)).into_response())
    }

    async fn handle_update_account_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateNamedTypeRequest>,
    ) -> Result<Response, AppError> {
        let account_type = resources
            .database
            .update_account_type(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Account type"))?;

        Ok((StatusCode::OK, Json(account_type)).into_response())
    }

    async fn handle_delete_account_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_account_type(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Account type"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ── Accounts ────────────────────────────────────────────────────────

    async fn handle_list_accounts(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let accounts = resources
            .database
            .list_accounts()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(accounts)).into_response())
    }

    async fn handle_get_account(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let account = resources
            .database
            .get_account(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Account"))?;

        Ok((StatusCode::OK, Json(account)).into_response())
    }

    async fn handle_create_account(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateAccountRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let account = resources
            .database
            .create_account(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(account_id = %account.id, "account created");

        Ok((StatusCode::CREATED, Json(account)).into_response())
    }

    async fn handle_update_account(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateAccountRequest>,
    ) -> Result<Response, AppError> {
        let account = resources
            .database
            .update_account(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Account"))?;

        Ok((StatusCode::OK, Json(account)).into_response())
    }

    async fn handle_delete_account(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_account(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Account"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ── Transaction types ───────────────────────────────────────────────

    async fn handle_list_transaction_types(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let types = resources
            .database
            .list_transaction_types()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(types)).into_response())
    }

    async fn handle_get_transaction_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let transaction_type = resources
            .database
            .get_transaction_type(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Transaction type"))?;

        Ok((StatusCode::OK, Json(transaction_type)).into_response())
    }

    async fn handle_create_transaction_type(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateNamedTypeRequest>,
    ) -> Result<Response, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let transaction_type = resources
            .database
            .create_transaction_type(&request)
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::CREATED, Json(transaction_type)).into_response())
    }

    async fn handle_update_transaction_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateNamedTypeRequest>,
    ) -> Result<Response, AppError> {
        let transaction_type = resources
            .database
            .update_transaction_type(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Transaction type"))?;

        Ok((StatusCode::OK, Json(transaction_type)).into_response())
    }

    async fn handle_delete_transaction_type(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_transaction_type(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Transaction type"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    // ── Transactions ────────────────────────────────────────────────────

    async fn handle_list_transactions(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let transactions = resources
            .database
            .list_transactions()
            .await
            .map_err(AppError::from_persistence)?;

        Ok((StatusCode::OK, Json(transactions)).into_response())
    }

    async fn handle_get_transaction(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let transaction = resources
            .database
            .get_transaction(id)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Transaction"))?;

        Ok((StatusCode::OK, Json(transaction)).into_response())
    }

    async fn handle_create_transaction(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateTransactionRequest>,
    ) -> Result<Response, AppError> {
        let transaction = resources
            .database
            .create_transaction(&request)
            .await
            .map_err(AppError::from_persistence)?;

        info!(
            transaction_id = %transaction.id,
            property_id = %transaction.property_id,
            amount = transaction.amount,
            "transaction recorded"
        );

        Ok((StatusCode::CREATED, Json(transaction)).into_response())
    }

    async fn handle_update_transaction(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
        Json(request): Json<UpdateTransactionRequest>,
    ) -> Result<Response, AppError> {
        let transaction = resources
            .database
            .update_transaction(id, &request)
            .await
            .map_err(AppError::from_persistence)?
            .ok_or_else(|| AppError::not_found("Transaction"))?;

        Ok((StatusCode::OK, Json(transaction)).into_response())
    }

    async fn handle_delete_transaction(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let deleted = resources
            .database
            .delete_transaction(id)
            .await
            .map_err(AppError::from_persistence)?;

        if !deleted {
            return Err(AppError::not_found("Transaction"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
