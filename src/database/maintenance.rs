// ABOUTME: Maintenance ticket persistence: CRUD with close/reopen timestamping

use super::Database;
use crate::models::{CreateTicketRequest, MaintenanceTicket, TicketStatus, UpdateTicketRequest};
use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create maintenance_tickets table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_maintenance(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS maintenance_tickets (
                id TEXT PRIMARY KEY,
                unit_id TEXT NOT NULL REFERENCES units(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'open'
                    CHECK (status IN ('open', 'in_progress', 'closed')),
                opened_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                closed_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tickets_unit ON maintenance_tickets(unit_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Open a maintenance ticket
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown unit)
    pub async fn create_ticket(&self, request: &CreateTicketRequest) -> Result<MaintenanceTicket> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO maintenance_tickets (id, unit_id, title, description, status)
            VALUES ($1, $2, $3, $4, 'open')
            ",
        )
        .bind(id.to_string())
        .bind(request.unit_id.to_string())
        .bind(&request.title)
        .bind(request.description.as_deref())
        .execute(&self.pool)
        .await?;

        self.get_ticket(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("ticket vanished after insert"))
    }

    /// Get one ticket by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_ticket(&self, id: Uuid) -> Result<Option<MaintenanceTicket>> {
        let row = sqlx::query(
            r"
            SELECT id, unit_id, title, description, status, opened_at, closed_at
            FROM maintenance_tickets WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_ticket(&row)).transpose()
    }

    /// List all tickets, open ones first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_tickets(&self) -> Result<Vec<MaintenanceTicket>> {
        let rows = sqlx::query(
            r"
            SELECT id, unit_id, title, description, status, opened_at, closed_at
            FROM maintenance_tickets
            ORDER BY (status = 'closed'), opened_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_ticket).collect()
    }

    /// Update a ticket.
    ///
    /// Transitioning into `closed` stamps `closed_at`; moving out of
    /// `closed` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_ticket(
        &self,
        id: Uuid,
        request: &UpdateTicketRequest,
    ) -> Result<Option<MaintenanceTicket>> {
        let Some(current) = self.get_ticket(id).await? else {
            return Ok(None);
        };

        let next_status = request.status.unwrap_or(current.status);
        let closed_at = match (current.status, next_status) {
            (TicketStatus::Closed, TicketStatus::Closed) => current.closed_at,
            (_, TicketStatus::Closed) => Some(Utc::now()),
            _ => None,
        };

        sqlx::query(
            r"
            UPDATE maintenance_tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = $4,
                closed_at = $5
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.title.as_deref())
        .bind(request.description.as_deref())
        .bind(next_status.as_str())
        .bind(closed_at)
        .execute(&self.pool)
        .await?;

        self.get_ticket(id).await
    }

    /// Delete a ticket
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_ticket(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM maintenance_tickets WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Convert a database row to a MaintenanceTicket struct
    fn row_to_ticket(row: &sqlx::sqlite::SqliteRow) -> Result<MaintenanceTicket> {
        let id: String = row.get("id");
        let unit_id: String = row.get("unit_id");
        let status: String = row.get("status");
        Ok(MaintenanceTicket {
            id: Uuid::parse_str(&id)?,
            unit_id: Uuid::parse_str(&unit_id)?,
            title: row.get("title"),
            description: row.get("description"),
            status: status.parse()?,
            opened_at: row.get("opened_at"),
            closed_at: row.get("closed_at"),
        })
    }
}
