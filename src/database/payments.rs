// ABOUTME: Payment persistence: plain CRUD scoped to a parent tenant

use super::Database;
use crate::models::{CreatePaymentRequest, Payment, UpdatePaymentRequest};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create payments table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_payments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL REFERENCES tenants(id) ON DELETE CASCADE,
                amount REAL NOT NULL,
                payment_date DATE NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_payments_tenant ON payments(tenant_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record a payment
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown tenant)
    pub async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO payments (id, tenant_id, amount, payment_date, status)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.to_string())
        .bind(request.tenant_id.to_string())
        .bind(request.amount)
        .bind(request.payment_date)
        .bind(&request.status)
        .execute(&self.pool)
        .await?;

        self.get_payment(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("payment vanished after insert"))
    }

    /// Get one payment by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(
            r"
            SELECT id, tenant_id, amount, payment_date, status, created_at
            FROM payments WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_payment(&row)).transpose()
    }

    /// List all payments
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r"
            SELECT id, tenant_id, amount, payment_date, status, created_at
            FROM payments ORDER BY payment_date, created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_payment).collect()
    }

    /// Update a payment; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_payment(
        &self,
        id: Uuid,
        request: &UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        let updated = sqlx::query(
            r"
            UPDATE payments SET
                amount = COALESCE($2, amount),
                payment_date = COALESCE($3, payment_date),
                status = COALESCE($4, status)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.amount)
        .bind(request.payment_date)
        .bind(request.status.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_payment(id).await
    }

    /// Delete a payment
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_payment(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Convert a database row to a Payment struct
    fn row_to_payment(row: &sqlx::sqlite::SqliteRow) -> Result<Payment> {
        let id: String = row.get("id");
        let tenant_id: String = row.get("tenant_id");
        Ok(Payment {
            id: Uuid::parse_str(&id)?,
            tenant_id: Uuid::parse_str(&tenant_id)?,
            amount: row.get("amount"),
            payment_date: row.get("payment_date"),
            status: row.get("status"),
            created_at: row.get("created_at"),
        })
    }
}
