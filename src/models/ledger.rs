// ABOUTME: Minimal ledger models: account types, accounts, transaction types, transactions, payments
// ABOUTME: Transactions reference an account and a property; payments reference a tenant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of ledger account (operating, escrow, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountType {
    /// Unique account type identifier
    pub id: Uuid,
    /// Type name
    pub name: String,
}

/// A ledger account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,
    /// Account category
    pub account_type_id: Uuid,
    /// Account name
    pub name: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A category of transaction (rent, repair, fee, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionType {
    /// Unique transaction type identifier
    pub id: Uuid,
    /// Type name
    pub name: String,
}

/// A ledger transaction against an account and a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: Uuid,
    /// Ledger account
    pub account_id: Uuid,
    /// Related property
    pub property_id: Uuid,
    /// Optional category
    pub transaction_type_id: Option<Uuid>,
    /// Signed amount; negative for outflows
    pub amount: f64,
    /// Free-form memo
    pub memo: Option<String>,
    /// Effective date
    pub transaction_date: NaiveDate,
    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

/// A rent payment made by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier
    pub id: Uuid,
    /// Paying tenant
    pub tenant_id: Uuid,
    /// Amount paid
    pub amount: f64,
    /// Payment date
    pub payment_date: NaiveDate,
    /// Settlement status (pending, settled, failed, ...)
    pub status: String,
    /// When the payment was recorded
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/account-types` and `POST /api/transaction-types`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNamedTypeRequest {
    pub name: String,
}

/// Request body for `PUT` on named type resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNamedTypeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body for `POST /api/accounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub account_type_id: Uuid,
    pub name: String,
}

/// Request body for `PUT /api/accounts/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body for `POST /api/transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: Uuid,
    pub property_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type_id: Option<Uuid>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Request body for `PUT /api/transactions/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
}

/// Request body for `POST /api/payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub tenant_id: Uuid,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub status: String,
}

/// Request body for `PUT /api/payments/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
