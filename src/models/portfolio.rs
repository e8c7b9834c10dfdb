// ABOUTME: Portfolio models grouping properties per customer via a join table
// ABOUTME: Membership is many-to-many; attaching the same property twice is a conflict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::property::Property;

/// A named grouping of properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Unique portfolio identifier
    pub id: Uuid,
    /// Portfolio name
    pub name: String,
    /// Owning customer's email; there is no user account system
    pub customer_email: Option<String>,
    /// When the portfolio was created
    pub created_at: DateTime<Utc>,
}

/// A portfolio with its declared eager-loaded relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDetail {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    /// Member properties
    pub properties: Vec<Property>,
}

/// Request body for `POST /api/portfolios`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePortfolioRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Initial member properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_ids: Option<Vec<Uuid>>,
}

/// Request body for `PUT /api/portfolios/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePortfolioRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// Request body for `POST /api/portfolios/:id/properties`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachPropertyRequest {
    pub property_id: Uuid,
}
