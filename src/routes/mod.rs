// ABOUTME: Route module root merging one axum router per REST resource
// ABOUTME: Every handler returns Result<Response, AppError> for uniform status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! `HTTP` routes for the Quarters REST surface.
//!
//! Each resource lives in its own module exposing a `routes()` constructor;
//! [`api_routes`] merges them into the application router.

use crate::server::ServerResources;
use axum::Router;
use std::sync::Arc;

/// Property address sub-resources
pub mod addresses;

/// Associations and board members
pub mod associations;

/// Health probe
pub mod health;

/// Account types, accounts, transaction types, transactions
pub mod ledger;

/// Maintenance tickets
pub mod maintenance;

/// Owners
pub mod owners;

/// Tenant payments
pub mod payments;

/// Photos
pub mod photos;

/// Portfolios and their property memberships
pub mod portfolios;

/// Properties with the composite write protocol
pub mod properties;

/// Subscription plans and subscriptions
pub mod subscriptions;

/// Tenants
pub mod tenants;

/// Units
pub mod units;

/// Merge all resource routers into the application router
pub fn api_routes(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(health::HealthRoutes::routes(resources.clone()))
        .merge(properties::PropertyRoutes::routes(resources.clone()))
        .merge(addresses::AddressRoutes::routes(resources.clone()))
        .merge(units::UnitRoutes::routes(resources.clone()))
        .merge(tenants::TenantRoutes::routes(resources.clone()))
        .merge(owners::OwnerRoutes::routes(resources.clone()))
        .merge(associations::AssociationRoutes::routes(resources.clone()))
        .merge(ledger::LedgerRoutes::routes(resources.clone()))
        .merge(payments::PaymentRoutes::routes(resources.clone()))
        .merge(photos::PhotoRoutes::routes(resources.clone()))
        .merge(maintenance::MaintenanceRoutes::routes(resources.clone()))
        .merge(subscriptions::SubscriptionRoutes::routes(resources.clone()))
        .merge(portfolios::PortfolioRoutes::routes(resources))
}
