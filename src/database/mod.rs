// ABOUTME: Database management root: pool construction, migrations, and module wiring
// ABOUTME: Each entity family adds its CRUD methods to Database from its own module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! # Database Management
//!
//! This module provides the persistence gateway for the Quarters server.
//! All access goes through [`Database`], a thin wrapper over a bounded
//! SQLite connection pool. Entity CRUD is split across per-domain modules
//! that each extend `impl Database`; schema setup runs at startup through
//! `migrate()` using idempotent `CREATE TABLE IF NOT EXISTS` statements.

mod associations;
mod ledger;
mod maintenance;
mod owners;
mod payments;
mod photos;
mod portfolios;
mod properties;
mod seed;
mod subscriptions;
mod tenants;
mod units;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Maximum connections in the pool; requests queue when it is exhausted
const MAX_POOL_CONNECTIONS: u32 = 5;

/// Database manager for property management entities
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(&connection_options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        // Property aggregate
        self.migrate_properties().await?;
        self.migrate_units().await?;
        self.migrate_tenants().await?;
        self.migrate_owners().await?;
        self.migrate_associations().await?;

        // Ledger
        self.migrate_ledger().await?;
        self.migrate_payments().await?;

        // Attachments and operations
        self.migrate_photos().await?;
        self.migrate_maintenance().await?;

        // Billing and grouping
        self.migrate_subscriptions().await?;
        self.migrate_portfolios().await?;

        Ok(())
    }

    /// Lightweight connectivity probe for health reporting
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> Result<Database> {
        // In-memory database; sqlx shares it across all pool connections
        Database::new("sqlite::memory:").await
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = create_test_db().await.unwrap();
        db.migrate().await.unwrap();
        db.ping().await.unwrap();
    }
}
