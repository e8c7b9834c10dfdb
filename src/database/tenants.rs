// ABOUTME: Tenant persistence: CRUD and payment cascade on delete

use super::Database;
use crate::models::{CreateTenantRequest, Tenant, UpdateTenantRequest};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create tenants table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_tenants(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tenants (
                id TEXT PRIMARY KEY,
                unit_id TEXT NOT NULL REFERENCES units(id) ON DELETE CASCADE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                lease_start DATE,
                lease_end DATE,
                rent REAL NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tenants_unit ON tenants(unit_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a tenant
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown unit)
    pub async fn create_tenant(&self, request: &CreateTenantRequest) -> Result<Tenant> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO tenants
                (id, unit_id, first_name, last_name, email, phone, lease_start, lease_end, rent)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(id.to_string())
        .bind(request.unit_id.to_string())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(request.phone.as_deref())
        .bind(request.lease_start)
        .bind(request.lease_end)
        .bind(request.rent)
        .execute(&self.pool)
        .await?;

        self.get_tenant(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("tenant vanished after insert"))
    }

    /// Get one tenant by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_tenant(&self, id: Uuid) -> Result<Option<Tenant>> {
        let row = sqlx::query(
            r"
            SELECT id, unit_id, first_name, last_name, email, phone,
                   lease_start, lease_end, rent, created_at
            FROM tenants WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_tenant(&row)).transpose()
    }

    /// List all tenants
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tenants(&self) -> Result<Vec<Tenant>> {
        let rows = sqlx::query(
            r"
            SELECT id, unit_id, first_name, last_name, email, phone,
                   lease_start, lease_end, rent, created_at
            FROM tenants ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_tenant).collect()
    }

    /// Update a tenant; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_tenant(
        &self,
        id: Uuid,
        request: &UpdateTenantRequest,
    ) -> Result<Option<Tenant>> {
        let updated = sqlx::query(
            r"
            UPDATE tenants SET
                unit_id = COALESCE($2, unit_id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                lease_start = COALESCE($7, lease_start),
                lease_end = COALESCE($8, lease_end),
                rent = COALESCE($9, rent)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.unit_id.map(|v| v.to_string()))
        .bind(request.first_name.as_deref())
        .bind(request.last_name.as_deref())
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .bind(request.lease_start)
        .bind(request.lease_end)
        .bind(request.rent)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_tenant(id).await
    }

    /// Delete a tenant and their payments
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_tenant(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let id_str = id.to_string();

        sqlx::query("DELETE FROM payments WHERE tenant_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Tenants of one unit
    pub(super) async fn tenants_of(&self, unit_id: Uuid) -> Result<Vec<Tenant>> {
        let rows = sqlx::query(
            r"
            SELECT id, unit_id, first_name, last_name, email, phone,
                   lease_start, lease_end, rent, created_at
            FROM tenants WHERE unit_id = $1 ORDER BY created_at, id
            ",
        )
        .bind(unit_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_tenant).collect()
    }

    /// Convert a database row to a Tenant struct
    fn row_to_tenant(row: &sqlx::sqlite::SqliteRow) -> Result<Tenant> {
        let id: String = row.get("id");
        let unit_id: String = row.get("unit_id");
        Ok(Tenant {
            id: Uuid::parse_str(&id)?,
            unit_id: Uuid::parse_str(&unit_id)?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            lease_start: row.get("lease_start"),
            lease_end: row.get("lease_end"),
            rent: row.get("rent"),
            created_at: row.get("created_at"),
        })
    }
}
