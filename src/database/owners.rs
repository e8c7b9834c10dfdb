// ABOUTME: Owner persistence: plain CRUD scoped to a parent property

use super::Database;
use crate::models::{CreateOwnerRequest, Owner, UpdateOwnerRequest};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create owners table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_owners(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS owners (
                id TEXT PRIMARY KEY,
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_owners_property ON owners(property_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create an owner
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown property)
    pub async fn create_owner(&self, request: &CreateOwnerRequest) -> Result<Owner> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO owners (id, property_id, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(request.property_id.to_string())
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(request.phone.as_deref())
        .execute(&self.pool)
        .await?;

        self.get_owner(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("owner vanished after insert"))
    }

    /// Get one owner by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_owner(&self, id: Uuid) -> Result<Option<Owner>> {
        let row = sqlx::query(
            r"
            SELECT id, property_id, first_name, last_name, email, phone, created_at
            FROM owners WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_owner(&row)).transpose()
    }

    /// List all owners
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_owners(&self) -> Result<Vec<Owner>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, first_name, last_name, email, phone, created_at
            FROM owners ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_owner).collect()
    }

    /// Update an owner; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_owner(
        &self,
        id: Uuid,
        request: &UpdateOwnerRequest,
    ) -> Result<Option<Owner>> {
        let updated = sqlx::query(
            r"
            UPDATE owners SET
                property_id = COALESCE($2, property_id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.property_id.map(|v| v.to_string()))
        .bind(request.first_name.as_deref())
        .bind(request.last_name.as_deref())
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_owner(id).await
    }

    /// Delete an owner
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_owner(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Owners of one property
    pub(super) async fn owners_of(&self, property_id: Uuid) -> Result<Vec<Owner>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, first_name, last_name, email, phone, created_at
            FROM owners WHERE property_id = $1 ORDER BY created_at, id
            ",
        )
        .bind(property_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_owner).collect()
    }

    /// Convert a database row to an Owner struct
    fn row_to_owner(row: &sqlx::sqlite::SqliteRow) -> Result<Owner> {
        let id: String = row.get("id");
        let property_id: String = row.get("property_id");
        Ok(Owner {
            id: Uuid::parse_str(&id)?,
            property_id: Uuid::parse_str(&property_id)?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            created_at: row.get("created_at"),
        })
    }
}
