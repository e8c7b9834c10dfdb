// ABOUTME: Owner, association, and board member models
// ABOUTME: All three are dependents of a property; board members hang off an association
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An owner of a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Unique owner identifier
    pub id: Uuid,
    /// Owned property
    pub property_id: Uuid,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// When the owner record was created
    pub created_at: DateTime<Utc>,
}

/// An HOA-style association attached to a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    /// Unique association identifier
    pub id: Uuid,
    /// Governed property
    pub property_id: Uuid,
    /// Association name
    pub name: String,
    /// Contact email
    pub contact_email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Monthly fee charged by the association
    pub monthly_fee: f64,
    /// When the association record was created
    pub created_at: DateTime<Utc>,
}

/// An association with its declared eager-loaded relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationDetail {
    #[serde(flatten)]
    pub association: Association,
    /// Board members of the association
    pub board_members: Vec<BoardMember>,
}

/// A board member of an association
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMember {
    /// Unique board member identifier
    pub id: Uuid,
    /// Association served
    pub association_id: Uuid,
    /// Member name
    pub name: String,
    /// Board role (president, treasurer, ...)
    pub role: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// When the board member record was created
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/owners`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOwnerRequest {
    pub property_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for `PUT /api/owners/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOwnerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for `POST /api/associations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssociationRequest {
    pub property_id: Uuid,
    pub name: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub monthly_fee: f64,
}

/// Request body for `PUT /api/associations/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssociationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<f64>,
}

/// Request body for `POST /api/board-members`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardMemberRequest {
    pub association_id: Uuid,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for `PUT /api/board-members/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBoardMemberRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
