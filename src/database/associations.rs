// ABOUTME: Association and board member persistence
// ABOUTME: Association delete cascades to its board members in one transaction

use super::Database;
use crate::models::{
    Association, AssociationDetail, BoardMember, CreateAssociationRequest,
    CreateBoardMemberRequest, UpdateAssociationRequest, UpdateBoardMemberRequest,
};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create associations and board_members tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_associations(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS associations (
                id TEXT PRIMARY KEY,
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                contact_email TEXT NOT NULL,
                phone TEXT,
                monthly_fee REAL NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS board_members (
                id TEXT PRIMARY KEY,
                association_id TEXT NOT NULL REFERENCES associations(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                email TEXT,
                phone TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_board_members_assoc ON board_members(association_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create an association
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown property)
    pub async fn create_association(
        &self,
        request: &CreateAssociationRequest,
    ) -> Result<Association> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO associations (id, property_id, name, contact_email, phone, monthly_fee)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(request.property_id.to_string())
        .bind(&request.name)
        .bind(&request.contact_email)
        .bind(request.phone.as_deref())
        .bind(request.monthly_fee)
        .execute(&self.pool)
        .await?;

        self.get_association(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("association vanished after insert"))
    }

    /// Get one association by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_association(&self, id: Uuid) -> Result<Option<Association>> {
        let row = sqlx::query(
            r"
            SELECT id, property_id, name, contact_email, phone, monthly_fee, created_at
            FROM associations WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_association(&row)).transpose()
    }

    /// Get one association with its board members
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_association_detail(&self, id: Uuid) -> Result<Option<AssociationDetail>> {
        let Some(association) = self.get_association(id).await? else {
            return Ok(None);
        };
        let board_members = self.board_members_of(id).await?;
        Ok(Some(AssociationDetail {
            association,
            board_members,
        }))
    }

    /// List all associations with their board members
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_associations(&self) -> Result<Vec<AssociationDetail>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, name, contact_email, phone, monthly_fee, created_at
            FROM associations ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let association = Self::row_to_association(&row)?;
            let board_members = self.board_members_of(association.id).await?;
            details.push(AssociationDetail {
                association,
                board_members,
            });
        }

        Ok(details)
    }

    /// Update an association; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_association(
        &self,
        id: Uuid,
        request: &UpdateAssociationRequest,
    ) -> Result<Option<Association>> {
        let updated = sqlx::query(
            r"
            UPDATE associations SET
                name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                phone = COALESCE($4, phone),
                monthly_fee = COALESCE($5, monthly_fee)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.name.as_deref())
        .bind(request.contact_email.as_deref())
        .bind(request.phone.as_deref())
        .bind(request.monthly_fee)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_association(id).await
    }

    /// Delete an association and its board members
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_association(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let id_str = id.to_string();

        sqlx::query("DELETE FROM board_members WHERE association_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM associations WHERE id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Create a board member
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown association)
    pub async fn create_board_member(
        &self,
        request: &CreateBoardMemberRequest,
    ) -> Result<BoardMember> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO board_members (id, association_id, name, role, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(request.association_id.to_string())
        .bind(&request.name)
        .bind(&request.role)
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .execute(&self.pool)
        .await?;

        self.get_board_member(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("board member vanished after insert"))
    }

    /// Get one board member by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_board_member(&self, id: Uuid) -> Result<Option<BoardMember>> {
        let row = sqlx::query(
            r"
            SELECT id, association_id, name, role, email, phone, created_at
            FROM board_members WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_board_member(&row)).transpose()
    }

    /// List all board members
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_board_members(&self) -> Result<Vec<BoardMember>> {
        let rows = sqlx::query(
            r"
            SELECT id, association_id, name, role, email, phone, created_at
            FROM board_members ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_board_member).collect()
    }

    /// Update a board member; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_board_member(
        &self,
        id: Uuid,
        request: &UpdateBoardMemberRequest,
    ) -> Result<Option<BoardMember>> {
        let updated = sqlx::query(
            r"
            UPDATE board_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.name.as_deref())
        .bind(request.role.as_deref())
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_board_member(id).await
    }

    /// Delete a board member
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_board_member(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM board_members WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Board members of one association
    async fn board_members_of(&self, association_id: Uuid) -> Result<Vec<BoardMember>> {
        let rows = sqlx::query(
            r"
            SELECT id, association_id, name, role, email, phone, created_at
            FROM board_members WHERE association_id = $1 ORDER BY created_at, id
            ",
        )
        .bind(association_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_board_member).collect()
    }

    /// Convert a database row to an Association struct
    fn row_to_association(row: &sqlx::sqlite::SqliteRow) -> Result<Association> {
        let id: String = row.get("id");
        let property_id: String = row.get("property_id");
        Ok(Association {
            id: Uuid::parse_str(&id)?,
            property_id: Uuid::parse_str(&property_id)?,
            name: row.get("name"),
            contact_email: row.get("contact_email"),
            phone: row.get("phone"),
            monthly_fee: row.get("monthly_fee"),
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a BoardMember struct
    fn row_to_board_member(row: &sqlx::sqlite::SqliteRow) -> Result<BoardMember> {
        let id: String = row.get("id");
        let association_id: String = row.get("association_id");
        Ok(BoardMember {
            id: Uuid::parse_str(&id)?,
            association_id: Uuid::parse_str(&association_id)?,
            name: row.get("name"),
            role: row.get("role"),
            email: row.get("email"),
            phone: row.get("phone"),
            created_at: row.get("created_at"),
        })
    }
}
