// ABOUTME: Portfolio persistence: CRUD plus property attach/detach through the join table

use super::Database;
use crate::models::{
    CreatePortfolioRequest, Portfolio, PortfolioDetail, Property, UpdatePortfolioRequest,
};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create portfolios and portfolio_properties tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_portfolios(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS portfolios (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                customer_email TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS portfolio_properties (
                portfolio_id TEXT NOT NULL REFERENCES portfolios(id) ON DELETE CASCADE,
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                PRIMARY KEY (portfolio_id, property_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a portfolio, optionally attaching initial properties
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn create_portfolio(&self, request: &CreatePortfolioRequest) -> Result<Portfolio> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO portfolios (id, name, customer_email) VALUES ($1, $2, $3)")
            .bind(id.to_string())
            .bind(&request.name)
            .bind(request.customer_email.as_deref())
            .execute(&mut *tx)
            .await?;

        if let Some(property_ids) = &request.property_ids {
            for property_id in property_ids {
                sqlx::query(
                    "INSERT INTO portfolio_properties (portfolio_id, property_id) VALUES ($1, $2)",
                )
                .bind(id.to_string())
                .bind(property_id.to_string())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_portfolio(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("portfolio vanished after insert"))
    }

    /// Get one portfolio by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_portfolio(&self, id: Uuid) -> Result<Option<Portfolio>> {
        let row = sqlx::query(
            "SELECT id, name, customer_email, created_at FROM portfolios WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_portfolio(&row)).transpose()
    }

    /// Get one portfolio with its member properties
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_portfolio_detail(&self, id: Uuid) -> Result<Option<PortfolioDetail>> {
        let Some(portfolio) = self.get_portfolio(id).await? else {
            return Ok(None);
        };
        let properties = self.portfolio_properties_of(id).await?;
        Ok(Some(PortfolioDetail {
            portfolio,
            properties,
        }))
    }

    /// List all portfolios with their member properties
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_portfolios(&self) -> Result<Vec<PortfolioDetail>> {
        let rows = sqlx::query(
            "SELECT id, name, customer_email, created_at FROM portfolios ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let portfolio = Self::row_to_portfolio(&row)?;
            let properties = self.portfolio_properties_of(portfolio.id).await?;
            details.push(PortfolioDetail {
                portfolio,
                properties,
            });
        }

        Ok(details)
    }

    /// Update a portfolio; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_portfolio(
        &self,
        id: Uuid,
        request: &UpdatePortfolioRequest,
    ) -> Result<Option<Portfolio>> {
        let updated = sqlx::query(
            r"
            UPDATE portfolios SET
                name = COALESCE($2, name),
                customer_email = COALESCE($3, customer_email)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.name.as_deref())
        .bind(request.customer_email.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_portfolio(id).await
    }

    /// Delete a portfolio and its memberships
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_portfolio(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let id_str = id.to_string();

        sqlx::query("DELETE FROM portfolio_properties WHERE portfolio_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Attach a property to a portfolio.
    ///
    /// Returns `false` if the portfolio does not exist; attaching an
    /// already-attached property is a unique violation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (unknown property, duplicate)
    pub async fn attach_property(&self, portfolio_id: Uuid, property_id: Uuid) -> Result<bool> {
        if self.get_portfolio(portfolio_id).await?.is_none() {
            return Ok(false);
        }

        sqlx::query("INSERT INTO portfolio_properties (portfolio_id, property_id) VALUES ($1, $2)")
            .bind(portfolio_id.to_string())
            .bind(property_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Detach a property from a portfolio
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn detach_property(&self, portfolio_id: Uuid, property_id: Uuid) -> Result<bool> {
        let deleted = sqlx::query(
            "DELETE FROM portfolio_properties WHERE portfolio_id = $1 AND property_id = $2",
        )
        .bind(portfolio_id.to_string())
        .bind(property_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Member properties of one portfolio
    async fn portfolio_properties_of(&self, portfolio_id: Uuid) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            r"
            SELECT p.id, p.name, p.property_type, p.status, p.value, p.created_at, p.updated_at
            FROM properties p
            JOIN portfolio_properties pp ON pp.property_id = p.id
            WHERE pp.portfolio_id = $1
            ORDER BY p.created_at, p.id
            ",
        )
        .bind(portfolio_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(Property {
                    id: Uuid::parse_str(&id)?,
                    name: row.get("name"),
                    property_type: row.get("property_type"),
                    status: row.get("status"),
                    value: row.get("value"),
                    created_at: row.get("created_at"),
                    updated_at: row.get("updated_at"),
                })
            })
            .collect()
    }

    /// Convert a database row to a Portfolio struct
    fn row_to_portfolio(row: &sqlx::sqlite::SqliteRow) -> Result<Portfolio> {
        let id: String = row.get("id");
        Ok(Portfolio {
            id: Uuid::parse_str(&id)?,
            name: row.get("name"),
            customer_email: row.get("customer_email"),
            created_at: row.get("created_at"),
        })
    }
}
