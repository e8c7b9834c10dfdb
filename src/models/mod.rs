// ABOUTME: Data model module root re-exporting all entity and payload types
// ABOUTME: Groups entities by domain: property, occupancy, community, ledger, billing, portfolio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! Common data models for property management entities.
//!
//! Each submodule holds one domain family: the entity structs persisted by
//! the database layer, the create/update payload structs accepted by the
//! route handlers, and the eager-loaded "detail" structs returned where a
//! resource declares relations.

/// Subscription plans and subscriptions
pub mod billing;

/// Owners, associations, and board members
pub mod community;

/// Accounts, transactions, and payments
pub mod ledger;

/// Units, tenants, and maintenance tickets
pub mod occupancy;

/// Portfolios of properties
pub mod portfolio;

/// Properties, addresses, and photos
pub mod property;

pub use billing::*;
pub use community::*;
pub use ledger::*;
pub use occupancy::*;
pub use portfolio::*;
pub use property::*;
