// ABOUTME: Photo persistence: CRUD with primary-flag exclusivity per parent
// ABOUTME: A photo attaches to exactly one of a property or a unit

use super::Database;
use crate::models::{CreatePhotoRequest, Photo, UpdatePhotoRequest};
use anyhow::Result;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

impl Database {
    /// Create photos table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_photos(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS photos (
                id TEXT PRIMARY KEY,
                property_id TEXT REFERENCES properties(id) ON DELETE CASCADE,
                unit_id TEXT REFERENCES units(id) ON DELETE CASCADE,
                url TEXT NOT NULL,
                name TEXT NOT NULL,
                is_primary BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CHECK ((property_id IS NULL) != (unit_id IS NULL))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_property ON photos(property_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_unit ON photos(unit_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Attach a photo to a property or unit.
    ///
    /// The parent's first photo is always primary; an explicit `is_primary`
    /// demotes the current primary.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown parent)
    pub async fn create_photo(&self, request: &CreatePhotoRequest) -> Result<Photo> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let sibling_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM photos WHERE property_id IS $1 AND unit_id IS $2",
        )
        .bind(request.property_id.map(|v| v.to_string()))
        .bind(request.unit_id.map(|v| v.to_string()))
        .fetch_one(&mut *tx)
        .await?;
        let is_primary = request.is_primary || sibling_count == 0;

        if is_primary {
            Self::clear_primary_photo(&mut tx, request.property_id, request.unit_id).await?;
        }

        sqlx::query(
            r"
            INSERT INTO photos (id, property_id, unit_id, url, name, is_primary)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(request.property_id.map(|v| v.to_string()))
        .bind(request.unit_id.map(|v| v.to_string()))
        .bind(&request.url)
        .bind(&request.name)
        .bind(is_primary)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_photo(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("photo vanished after insert"))
    }

    /// Get one photo by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>> {
        let row = sqlx::query(
            r"
            SELECT id, property_id, unit_id, url, name, is_primary, created_at
            FROM photos WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_photo(&row)).transpose()
    }

    /// List all photos
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_photos(&self) -> Result<Vec<Photo>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, unit_id, url, name, is_primary, created_at
            FROM photos ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_photo).collect()
    }

    /// Update a photo; setting `is_primary` demotes its siblings
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn update_photo(
        &self,
        id: Uuid,
        request: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>> {
        let Some(current) = self.get_photo(id).await? else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        if request.is_primary == Some(true) {
            Self::clear_primary_photo(&mut tx, current.property_id, current.unit_id).await?;
        }

        sqlx::query(
            r"
            UPDATE photos SET
                url = COALESCE($2, url),
                name = COALESCE($3, name),
                is_primary = COALESCE($4, is_primary)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.url.as_deref())
        .bind(request.name.as_deref())
        .bind(request.is_primary)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_photo(id).await
    }

    /// Delete a photo
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_photo(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Property-level photos of one property, primary first
    pub(super) async fn property_photos_of(&self, property_id: Uuid) -> Result<Vec<Photo>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, unit_id, url, name, is_primary, created_at
            FROM photos WHERE property_id = $1
            ORDER BY is_primary DESC, created_at, id
            ",
        )
        .bind(property_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_photo).collect()
    }

    /// Demote the current primary photo of the given parent
    async fn clear_primary_photo(
        tx: &mut Transaction<'_, Sqlite>,
        property_id: Option<Uuid>,
        unit_id: Option<Uuid>,
    ) -> Result<()> {
        sqlx::query("UPDATE photos SET is_primary = 0 WHERE property_id IS $1 AND unit_id IS $2")
            .bind(property_id.map(|v| v.to_string()))
            .bind(unit_id.map(|v| v.to_string()))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Convert a database row to a Photo struct
    fn row_to_photo(row: &sqlx::sqlite::SqliteRow) -> Result<Photo> {
        let id: String = row.get("id");
        let property_id: Option<String> = row.get("property_id");
        let unit_id: Option<String> = row.get("unit_id");
        Ok(Photo {
            id: Uuid::parse_str(&id)?,
            property_id: property_id.as_deref().map(Uuid::parse_str).transpose()?,
            unit_id: unit_id.as_deref().map(Uuid::parse_str).transpose()?,
            url: row.get("url"),
            name: row.get("name"),
            is_primary: row.get("is_primary"),
            created_at: row.get("created_at"),
        })
    }
}
