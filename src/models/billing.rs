// ABOUTME: Subscription plan and subscription models for the billing surface
// ABOUTME: Subscriptions track a customer's active or cancelled plan state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A pricing tier customers can subscribe to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Plan name
    pub name: String,
    /// Price per billing interval
    pub price: f64,
    /// Billing interval (monthly, yearly)
    pub billing_interval: String,
    /// When the plan was created
    pub created_at: DateTime<Utc>,
}

/// Subscription lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            other => Err(anyhow::anyhow!("unknown subscription status: {other}")),
        }
    }
}

/// A customer's subscription to one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription identifier
    pub id: Uuid,
    /// Subscribed plan
    pub plan_id: Uuid,
    /// Customer email; there is no user account system
    pub customer_email: String,
    /// Lifecycle state
    pub status: SubscriptionStatus,
    /// When the subscription started
    pub started_at: DateTime<Utc>,
    /// When the subscription was cancelled, if it has been
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api/subscription/plans`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub price: f64,
    pub billing_interval: String,
}

/// Request body for `PUT /api/subscription/plans/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_interval: Option<String>,
}

/// Request body for `POST /api/subscriptions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub plan_id: Uuid,
    pub customer_email: String,
}

/// Request body for `PUT /api/subscriptions/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}
