// ABOUTME: Subscription plan and subscription persistence, including cancellation

use super::Database;
use crate::models::{
    CreatePlanRequest, CreateSubscriptionRequest, Subscription, SubscriptionPlan,
    SubscriptionStatus, UpdatePlanRequest, UpdateSubscriptionRequest,
};
use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create subscription_plans and subscriptions tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_subscriptions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscription_plans (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                billing_interval TEXT NOT NULL DEFAULT 'monthly',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL REFERENCES subscription_plans(id),
                customer_email TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active'
                    CHECK (status IN ('active', 'cancelled')),
                started_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                cancelled_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_subscriptions_email ON subscriptions(customer_email)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a subscription plan
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_plan(&self, request: &CreatePlanRequest) -> Result<SubscriptionPlan> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO subscription_plans (id, name, price, billing_interval)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(id.to_string())
        .bind(&request.name)
        .bind(request.price)
        .bind(&request.billing_interval)
        .execute(&self.pool)
        .await?;

        self.get_plan(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("plan vanished after insert"))
    }

    /// Get one plan by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_plan(&self, id: Uuid) -> Result<Option<SubscriptionPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, name, price, billing_interval, created_at
            FROM subscription_plans WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_plan(&row)).transpose()
    }

    /// List all plans, cheapest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_plans(&self) -> Result<Vec<SubscriptionPlan>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, price, billing_interval, created_at
            FROM subscription_plans ORDER BY price, name
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_plan).collect()
    }

    /// Update a plan; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_plan(
        &self,
        id: Uuid,
        request: &UpdatePlanRequest,
    ) -> Result<Option<SubscriptionPlan>> {
        let updated = sqlx::query(
            r"
            UPDATE subscription_plans SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                billing_interval = COALESCE($4, billing_interval)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.name.as_deref())
        .bind(request.price)
        .bind(request.billing_interval.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_plan(id).await
    }

    /// Delete a plan; fails while subscriptions still reference it
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_plan(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Start a subscription in the active state
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown plan)
    pub async fn create_subscription(
        &self,
        request: &CreateSubscriptionRequest,
    ) -> Result<Subscription> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO subscriptions (id, plan_id, customer_email, status)
            VALUES ($1, $2, $3, 'active')
            ",
        )
        .bind(id.to_string())
        .bind(request.plan_id.to_string())
        .bind(&request.customer_email)
        .execute(&self.pool)
        .await?;

        self.get_subscription(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("subscription vanished after insert"))
    }

    /// Get one subscription by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>> {
        let row = sqlx::query(
            r"
            SELECT id, plan_id, customer_email, status, started_at, cancelled_at
            FROM subscriptions WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_subscription(&row)).transpose()
    }

    /// List all subscriptions
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_id, customer_email, status, started_at, cancelled_at
            FROM subscriptions ORDER BY started_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_subscription).collect()
    }

    /// Update a subscription; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_subscription(
        &self,
        id: Uuid,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Option<Subscription>> {
        let updated = sqlx::query(
            r"
            UPDATE subscriptions SET
                plan_id = COALESCE($2, plan_id),
                customer_email = COALESCE($3, customer_email)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.plan_id.map(|v| v.to_string()))
        .bind(request.customer_email.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_subscription(id).await
    }

    /// Cancel a subscription, stamping `cancelled_at`.
    ///
    /// Cancelling an already-cancelled subscription keeps the original
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn cancel_subscription(&self, id: Uuid) -> Result<Option<Subscription>> {
        let Some(current) = self.get_subscription(id).await? else {
            return Ok(None);
        };

        if current.status == SubscriptionStatus::Cancelled {
            return Ok(Some(current));
        }

        sqlx::query(
            "UPDATE subscriptions SET status = 'cancelled', cancelled_at = $2 WHERE id = $1",
        )
        .bind(id.to_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get_subscription(id).await
    }

    /// Delete a subscription
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_subscription(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Convert a database row to a SubscriptionPlan struct
    fn row_to_plan(row: &sqlx::sqlite::SqliteRow) -> Result<SubscriptionPlan> {
        let id: String = row.get("id");
        Ok(SubscriptionPlan {
            id: Uuid::parse_str(&id)?,
            name: row.get("name"),
            price: row.get("price"),
            billing_interval: row.get("billing_interval"),
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a Subscription struct
    fn row_to_subscription(row: &sqlx::sqlite::SqliteRow) -> Result<Subscription> {
        let id: String = row.get("id");
        let plan_id: String = row.get("plan_id");
        let status: String = row.get("status");
        Ok(Subscription {
            id: Uuid::parse_str(&id)?,
            plan_id: Uuid::parse_str(&plan_id)?,
            customer_email: row.get("customer_email"),
            status: status.parse()?,
            started_at: row.get("started_at"),
            cancelled_at: row.get("cancelled_at"),
        })
    }
}
