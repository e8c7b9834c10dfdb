// ABOUTME: Property, address, and photo entity models with composite write payloads
// ABOUTME: Property is the aggregate root; addresses and photos are its direct children
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::community::Owner;

/// A managed property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Unique property identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Property type (single_family, multi_family, commercial, ...)
    pub property_type: String,
    /// Lifecycle status (active, vacant, sold, ...)
    pub status: String,
    /// Assessed value
    pub value: f64,
    /// When the property was created
    pub created_at: DateTime<Utc>,
    /// When the property was last updated
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Creates a new property with the given details
    #[must_use]
    pub fn new(name: String, property_type: String, status: String, value: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            property_type,
            status,
            value,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A street address belonging to one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAddress {
    /// Unique address identifier
    pub id: Uuid,
    /// Owning property
    pub property_id: Uuid,
    /// Street line
    pub street: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub postal_code: String,
    /// Whether this is the property's primary address; at most one per property
    pub is_primary: bool,
    /// When the address was created
    pub created_at: DateTime<Utc>,
}

/// A photo attached to either a property or a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Unique photo identifier
    pub id: Uuid,
    /// Owning property, when attached at the property level
    pub property_id: Option<Uuid>,
    /// Owning unit, when attached at the unit level
    pub unit_id: Option<Uuid>,
    /// Image URL
    pub url: String,
    /// Display name
    pub name: String,
    /// Whether this is the parent's primary photo; at most one per parent
    pub is_primary: bool,
    /// When the photo was created
    pub created_at: DateTime<Utc>,
}

/// A property with its declared eager-loaded relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: Property,
    /// All addresses, primary first
    pub addresses: Vec<PropertyAddress>,
    /// All owners of the property
    pub owners: Vec<Owner>,
    /// Property-level photos
    pub photos: Vec<Photo>,
}

/// One address entry in a composite property submission.
///
/// An entry whose `id` matches an existing address of the property updates
/// that row; any other entry inserts a new row. Existing addresses absent
/// from the submission are deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressPayload {
    /// Existing address id, when updating
    pub id: Option<Uuid>,
    /// Street line
    pub street: String,
    /// City
    pub city: String,
    /// State or region
    pub state: String,
    /// Postal code
    pub postal_code: String,
}

/// One photo entry in a composite property submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoPayload {
    /// Existing photo id, when updating
    pub id: Option<Uuid>,
    /// Image URL
    pub url: String,
    /// Display name
    pub name: String,
}

/// Request body for `POST /api/properties`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub property_type: String,
    pub status: String,
    pub value: f64,
    /// Optional nested address list; first entry becomes primary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressPayload>>,
    /// Optional nested photo list; first entry becomes primary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<PhotoPayload>>,
}

/// Request body for `PUT /api/properties/:id`.
///
/// Absent scalar fields keep their current values. An absent `addresses` or
/// `photos` key leaves existing children untouched; an empty list deletes
/// them all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePropertyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<PhotoPayload>>,
}

/// Request body for `POST /api/properties/:id/addresses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAddressRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// Flag this address primary, demoting any current primary
    #[serde(default)]
    pub is_primary: bool,
}

/// Request body for `PUT /api/properties/addresses/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAddressRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// Request body for `POST /api/photos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    /// Attach at the property level; exactly one of `property_id`/`unit_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    /// Attach at the unit level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<Uuid>,
    pub url: String,
    pub name: String,
    /// Flag this photo primary, demoting any current primary for the parent
    #[serde(default)]
    pub is_primary: bool,
}

/// Request body for `PUT /api/photos/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePhotoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}
