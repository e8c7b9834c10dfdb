// ABOUTME: Unit persistence: CRUD, eager-loaded tenants, and cascade delete
// ABOUTME: Deleting a unit removes its tenants, payments, photos, and tickets in one transaction

use super::Database;
use crate::models::{CreateUnitRequest, Unit, UnitDetail, UpdateUnitRequest};
use anyhow::Result;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

impl Database {
    /// Create units table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_units(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS units (
                id TEXT PRIMARY KEY,
                address_id TEXT NOT NULL REFERENCES property_addresses(id) ON DELETE CASCADE,
                unit_number TEXT NOT NULL,
                rent REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'vacant',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_units_address ON units(address_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a unit
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown address)
    pub async fn create_unit(&self, request: &CreateUnitRequest) -> Result<Unit> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO units (id, address_id, unit_number, rent, status)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.to_string())
        .bind(request.address_id.to_string())
        .bind(&request.unit_number)
        .bind(request.rent)
        .bind(&request.status)
        .execute(&self.pool)
        .await?;

        self.get_unit(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("unit vanished after insert"))
    }

    /// Get one unit by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_unit(&self, id: Uuid) -> Result<Option<Unit>> {
        let row = sqlx::query(
            "SELECT id, address_id, unit_number, rent, status, created_at FROM units WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_unit(&row)).transpose()
    }

    /// Get one unit with its tenants
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_unit_detail(&self, id: Uuid) -> Result<Option<UnitDetail>> {
        let Some(unit) = self.get_unit(id).await? else {
            return Ok(None);
        };
        let tenants = self.tenants_of(id).await?;
        Ok(Some(UnitDetail { unit, tenants }))
    }

    /// List all units with their tenants
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_units(&self) -> Result<Vec<UnitDetail>> {
        let rows = sqlx::query(
            "SELECT id, address_id, unit_number, rent, status, created_at FROM units ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let unit = Self::row_to_unit(&row)?;
            let tenants = self.tenants_of(unit.id).await?;
            details.push(UnitDetail { unit, tenants });
        }

        Ok(details)
    }

    /// Update a unit; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_unit(&self, id: Uuid, request: &UpdateUnitRequest) -> Result<Option<Unit>> {
        let updated = sqlx::query(
            r"
            UPDATE units SET
                address_id = COALESCE($2, address_id),
                unit_number = COALESCE($3, unit_number),
                rent = COALESCE($4, rent),
                status = COALESCE($5, status)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.address_id.map(|v| v.to_string()))
        .bind(request.unit_number.as_deref())
        .bind(request.rent)
        .bind(request.status.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_unit(id).await
    }

    /// Delete a unit and its dependent records
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_unit(&self, id: Uuid) -> Result<bool> {
        if self.get_unit(id).await?.is_none() {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        Self::delete_unit_subtree(&mut tx, &id.to_string()).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Delete one unit plus its tenants, their payments, photos, and tickets
    pub(super) async fn delete_unit_subtree(
        tx: &mut Transaction<'_, Sqlite>,
        unit_id: &str,
    ) -> Result<()> {
        sqlx::query(
            "DELETE FROM payments WHERE tenant_id IN (SELECT id FROM tenants WHERE unit_id = $1)",
        )
        .bind(unit_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("DELETE FROM tenants WHERE unit_id = $1")
            .bind(unit_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM photos WHERE unit_id = $1")
            .bind(unit_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM maintenance_tickets WHERE unit_id = $1")
            .bind(unit_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(unit_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Convert a database row to a Unit struct
    fn row_to_unit(row: &sqlx::sqlite::SqliteRow) -> Result<Unit> {
        let id: String = row.get("id");
        let address_id: String = row.get("address_id");
        Ok(Unit {
            id: Uuid::parse_str(&id)?,
            address_id: Uuid::parse_str(&address_id)?,
            unit_number: row.get("unit_number"),
            rent: row.get("rent"),
            status: row.get("status"),
            created_at: row.get("created_at"),
        })
    }
}
