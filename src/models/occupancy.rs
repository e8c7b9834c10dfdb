// ABOUTME: Unit, tenant, and maintenance ticket models for occupancy tracking
// ABOUTME: Units hang off an address; tenants and tickets hang off a unit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A rentable unit at one property address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unique unit identifier
    pub id: Uuid,
    /// Owning address
    pub address_id: Uuid,
    /// Unit number or label ("2B", "Suite 400")
    pub unit_number: String,
    /// Monthly rent
    pub rent: f64,
    /// Occupancy status (vacant, occupied, renovating, ...)
    pub status: String,
    /// When the unit was created
    pub created_at: DateTime<Utc>,
}

/// A unit with its declared eager-loaded relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDetail {
    #[serde(flatten)]
    pub unit: Unit,
    /// Tenants currently attached to the unit
    pub tenants: Vec<Tenant>,
}

/// A tenant leasing one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier
    pub id: Uuid,
    /// Leased unit
    pub unit_id: Uuid,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Lease start date
    pub lease_start: Option<NaiveDate>,
    /// Lease end date
    pub lease_end: Option<NaiveDate>,
    /// Agreed monthly rent
    pub rent: f64,
    /// When the tenant was created
    pub created_at: DateTime<Utc>,
}

/// Maintenance ticket lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(anyhow::anyhow!("unknown ticket status: {other}")),
        }
    }
}

/// A maintenance ticket filed against a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    /// Unique ticket identifier
    pub id: Uuid,
    /// Affected unit
    pub unit_id: Uuid,
    /// Short summary
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Lifecycle state
    pub status: TicketStatus,
    /// When the ticket was opened
    pub opened_at: DateTime<Utc>,
    /// When the ticket was closed, if it has been
    pub closed_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api/units`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnitRequest {
    pub address_id: Uuid,
    pub unit_number: String,
    pub rent: f64,
    pub status: String,
}

/// Request body for `PUT /api/units/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUnitRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Request body for `POST /api/tenants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    pub unit_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_end: Option<NaiveDate>,
    pub rent: f64,
}

/// Request body for `PUT /api/tenants/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTenantRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
}

/// Request body for `POST /api/maintenance`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub unit_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `PUT /api/maintenance/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTicketRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Setting `closed` stamps `closed_at`; reopening clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_status_round_trip() {
        for status in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Closed,
        ] {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        }
        assert!("bogus".parse::<TicketStatus>().is_err());
    }
}
