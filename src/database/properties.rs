// ABOUTME: Property and address persistence: CRUD, composite child sync, cascade delete
// ABOUTME: The composite write protocol and the property cascade each run in one transaction

use super::Database;
use crate::models::{
    AddressPayload, CreateAddressRequest, CreatePropertyRequest, PhotoPayload, Property,
    PropertyAddress, PropertyDetail, UpdateAddressRequest, UpdatePropertyRequest,
};
use anyhow::Result;
use sqlx::{Row, Sqlite, Transaction};
use std::collections::HashSet;
use uuid::Uuid;

impl Database {
    /// Create properties and property_addresses tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_properties(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS properties (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                property_type TEXT NOT NULL,
                status TEXT NOT NULL,
                value REAL NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS property_addresses (
                id TEXT PRIMARY KEY,
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                street TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                postal_code TEXT NOT NULL,
                is_primary BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_addresses_property ON property_addresses(property_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a property, optionally with nested addresses and photos.
    ///
    /// The parent insert and all child writes run in one transaction; the
    /// first address and the first photo in submission order are flagged
    /// primary.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn create_property(&self, request: &CreatePropertyRequest) -> Result<Property> {
        let property = Property::new(
            request.name.clone(),
            request.property_type.clone(),
            request.status.clone(),
            request.value,
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO properties (id, name, property_type, status, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(property.id.to_string())
        .bind(&property.name)
        .bind(&property.property_type)
        .bind(&property.status)
        .bind(property.value)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&mut *tx)
        .await?;

        if let Some(addresses) = &request.addresses {
            Self::sync_addresses(&mut tx, property.id, addresses).await?;
        }
        if let Some(photos) = &request.photos {
            Self::sync_property_photos(&mut tx, property.id, photos).await?;
        }

        tx.commit().await?;

        Ok(property)
    }

    /// Get a property without relations
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_property(&self, id: Uuid) -> Result<Option<Property>> {
        let row = sqlx::query(
            r"
            SELECT id, name, property_type, status, value, created_at, updated_at
            FROM properties WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_property(&row)).transpose()
    }

    /// Get a property with its declared relations (addresses, owners, photos)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_property_detail(&self, id: Uuid) -> Result<Option<PropertyDetail>> {
        let Some(property) = self.get_property(id).await? else {
            return Ok(None);
        };

        let addresses = self.addresses_of(id).await?;
        let owners = self.owners_of(id).await?;
        let photos = self.property_photos_of(id).await?;

        Ok(Some(PropertyDetail {
            property,
            addresses,
            owners,
            photos,
        }))
    }

    /// List all properties with their declared relations
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_properties(&self) -> Result<Vec<PropertyDetail>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, property_type, status, value, created_at, updated_at
            FROM properties ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let property = Self::row_to_property(&row)?;
            let addresses = self.addresses_of(property.id).await?;
            let owners = self.owners_of(property.id).await?;
            let photos = self.property_photos_of(property.id).await?;
            details.push(PropertyDetail {
                property,
                addresses,
                owners,
                photos,
            });
        }

        Ok(details)
    }

    /// Update a property; absent scalar fields keep their current values.
    ///
    /// When `addresses` or `photos` are present the child lists are synced
    /// per the composite write protocol, in the same transaction as the
    /// parent update.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn update_property(
        &self,
        id: Uuid,
        request: &UpdatePropertyRequest,
    ) -> Result<Option<Property>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r"
            UPDATE properties SET
                name = COALESCE($2, name),
                property_type = COALESCE($3, property_type),
                status = COALESCE($4, status),
                value = COALESCE($5, value),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.name.as_deref())
        .bind(request.property_type.as_deref())
        .bind(request.status.as_deref())
        .bind(request.value)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(addresses) = &request.addresses {
            Self::sync_addresses(&mut tx, id, addresses).await?;
        }
        if let Some(photos) = &request.photos {
            Self::sync_property_photos(&mut tx, id, photos).await?;
        }

        tx.commit().await?;

        self.get_property(id).await
    }

    /// Delete a property and its full dependent subtree.
    ///
    /// Removes addresses, their units, those units' tenants and payments,
    /// plus owners, photos, associations with board members, transactions,
    /// and portfolio memberships, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_property(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let id_str = id.to_string();

        sqlx::query(
            r"
            DELETE FROM payments WHERE tenant_id IN (
                SELECT t.id FROM tenants t
                JOIN units u ON t.unit_id = u.id
                JOIN property_addresses a ON u.address_id = a.id
                WHERE a.property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM tenants WHERE unit_id IN (
                SELECT u.id FROM units u
                JOIN property_addresses a ON u.address_id = a.id
                WHERE a.property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM photos WHERE property_id = $1 OR unit_id IN (
                SELECT u.id FROM units u
                JOIN property_addresses a ON u.address_id = a.id
                WHERE a.property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM maintenance_tickets WHERE unit_id IN (
                SELECT u.id FROM units u
                JOIN property_addresses a ON u.address_id = a.id
                WHERE a.property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM units WHERE address_id IN (
                SELECT id FROM property_addresses WHERE property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM property_addresses WHERE property_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM owners WHERE property_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r"
            DELETE FROM board_members WHERE association_id IN (
                SELECT id FROM associations WHERE property_id = $1
            )
            ",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM associations WHERE property_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM transactions WHERE property_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM portfolio_properties WHERE property_id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// List addresses of a property, primary first.
    ///
    /// Returns `None` if the property itself does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_addresses(&self, property_id: Uuid) -> Result<Option<Vec<PropertyAddress>>> {
        if self.get_property(property_id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.addresses_of(property_id).await?))
    }

    /// Add one address to a property.
    ///
    /// The property's first address is always primary; an explicit
    /// `is_primary` demotes the current primary. Returns `None` if the
    /// property does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn create_address(
        &self,
        property_id: Uuid,
        request: &CreateAddressRequest,
    ) -> Result<Option<PropertyAddress>> {
        if self.get_property(property_id).await?.is_none() {
            return Ok(None);
        }

        let mut tx = self.pool.begin().await?;

        let sibling_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM property_addresses WHERE property_id = $1")
                .bind(property_id.to_string())
                .fetch_one(&mut *tx)
                .await?;
        let is_primary = request.is_primary || sibling_count == 0;

        if is_primary {
            sqlx::query("UPDATE property_addresses SET is_primary = 0 WHERE property_id = $1")
                .bind(property_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        let address_id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO property_addresses
                (id, property_id, street, city, state, postal_code, is_primary)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(address_id.to_string())
        .bind(property_id.to_string())
        .bind(&request.street)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.postal_code)
        .bind(is_primary)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_address(address_id).await
    }

    /// Get one address by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_address(&self, id: Uuid) -> Result<Option<PropertyAddress>> {
        let row = sqlx::query(
            r"
            SELECT id, property_id, street, city, state, postal_code, is_primary, created_at
            FROM property_addresses WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_address(&row)).transpose()
    }

    /// Update one address; setting `is_primary` demotes its siblings
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn update_address(
        &self,
        id: Uuid,
        request: &UpdateAddressRequest,
    ) -> Result<Option<PropertyAddress>> {
        let Some(current) = self.get_address(id).await? else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        if request.is_primary == Some(true) {
            sqlx::query("UPDATE property_addresses SET is_primary = 0 WHERE property_id = $1")
                .bind(current.property_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r"
            UPDATE property_addresses SET
                street = COALESCE($2, street),
                city = COALESCE($3, city),
                state = COALESCE($4, state),
                postal_code = COALESCE($5, postal_code),
                is_primary = COALESCE($6, is_primary)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.street.as_deref())
        .bind(request.city.as_deref())
        .bind(request.state.as_deref())
        .bind(request.postal_code.as_deref())
        .bind(request.is_primary)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_address(id).await
    }

    /// Delete one address and its unit subtree
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; no partial effect remains.
    pub async fn delete_address(&self, id: Uuid) -> Result<bool> {
        if self.get_address(id).await?.is_none() {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        Self::delete_address_subtree(&mut tx, &id.to_string()).await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Addresses of one property, primary first
    pub(super) async fn addresses_of(&self, property_id: Uuid) -> Result<Vec<PropertyAddress>> {
        let rows = sqlx::query(
            r"
            SELECT id, property_id, street, city, state, postal_code, is_primary, created_at
            FROM property_addresses
            WHERE property_id = $1
            ORDER BY is_primary DESC, created_at, id
            ",
        )
        .bind(property_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_address).collect()
    }

    /// Reconcile a property's address list against a composite submission.
    ///
    /// Submitted entries matching an existing address update it; the rest
    /// insert. Existing addresses absent from the submission are deleted
    /// together with their unit subtree. The first entry in submission
    /// order is flagged primary regardless of prior state.
    pub(super) async fn sync_addresses(
        tx: &mut Transaction<'_, Sqlite>,
        property_id: Uuid,
        submitted: &[AddressPayload],
    ) -> Result<()> {
        let existing: Vec<String> =
            sqlx::query_scalar("SELECT id FROM property_addresses WHERE property_id = $1")
                .bind(property_id.to_string())
                .fetch_all(&mut **tx)
                .await?;
        let existing: HashSet<String> = existing.into_iter().collect();

        let submitted_ids: HashSet<String> = submitted
            .iter()
            .filter_map(|payload| payload.id.map(|id| id.to_string()))
            .collect();

        for absent in existing.iter().filter(|id| !submitted_ids.contains(*id)) {
            Self::delete_address_subtree(tx, absent).await?;
        }

        for (index, payload) in submitted.iter().enumerate() {
            let is_primary = index == 0;
            let payload_id = payload.id.map(|id| id.to_string());

            match payload_id.filter(|id| existing.contains(id)) {
                Some(id) => {
                    sqlx::query(
                        r"
                        UPDATE property_addresses SET
                            street = $2, city = $3, state = $4, postal_code = $5, is_primary = $6
                        WHERE id = $1
                        ",
                    )
                    .bind(id)
                    .bind(&payload.street)
                    .bind(&payload.city)
                    .bind(&payload.state)
                    .bind(&payload.postal_code)
                    .bind(is_primary)
                    .execute(&mut **tx)
                    .await?;
                }
                None => {
                    let id = payload.id.unwrap_or_else(Uuid::new_v4);
                    sqlx::query(
                        r"
                        INSERT INTO property_addresses
                            (id, property_id, street, city, state, postal_code, is_primary)
                        VALUES ($1, $2, $3, $4, $5, $6, $7)
                        ",
                    )
                    .bind(id.to_string())
                    .bind(property_id.to_string())
                    .bind(&payload.street)
                    .bind(&payload.city)
                    .bind(&payload.state)
                    .bind(&payload.postal_code)
                    .bind(is_primary)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }

    /// Reconcile a property's photo list against a composite submission.
    ///
    /// Same diff rules as addresses, with no subtree to cascade.
    pub(super) async fn sync_property_photos(
        tx: &mut Transaction<'_, Sqlite>,
        property_id: Uuid,
        submitted: &[PhotoPayload],
    ) -> Result<()> {
        let existing: Vec<String> =
            sqlx::query_scalar("SELECT id FROM photos WHERE property_id = $1")
                .bind(property_id.to_string())
                .fetch_all(&mut **tx)
                .await?;
        let existing: HashSet<String> = existing.into_iter().collect();

        let submitted_ids: HashSet<String> = submitted
            .iter()
            .filter_map(|payload| payload.id.map(|id| id.to_string()))
            .collect();

        for absent in existing.iter().filter(|id| !submitted_ids.contains(*id)) {
            sqlx::query("DELETE FROM photos WHERE id = $1")
                .bind(absent)
                .execute(&mut **tx)
                .await?;
        }

        for (index, payload) in submitted.iter().enumerate() {
            let is_primary = index == 0;
            let payload_id = payload.id.map(|id| id.to_string());

            match payload_id.filter(|id| existing.contains(id)) {
                Some(id) => {
                    sqlx::query(
                        "UPDATE photos SET url = $2, name = $3, is_primary = $4 WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&payload.url)
                    .bind(&payload.name)
                    .bind(is_primary)
                    .execute(&mut **tx)
                    .await?;
                }
                None => {
                    let id = payload.id.unwrap_or_else(Uuid::new_v4);
                    sqlx::query(
                        r"
                        INSERT INTO photos (id, property_id, url, name, is_primary)
                        VALUES ($1, $2, $3, $4, $5)
                        ",
                    )
                    .bind(id.to_string())
                    .bind(property_id.to_string())
                    .bind(&payload.url)
                    .bind(&payload.name)
                    .bind(is_primary)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }

        Ok(())
    }

    /// Delete one address plus its units, their tenants, payments, photos,
    /// and maintenance tickets
    pub(super) async fn delete_address_subtree(
        tx: &mut Transaction<'_, Sqlite>,
        address_id: &str,
    ) -> Result<()> {
        sqlx::query(
            r"
            DELETE FROM payments WHERE tenant_id IN (
                SELECT t.id FROM tenants t
                JOIN units u ON t.unit_id = u.id
                WHERE u.address_id = $1
            )
            ",
        )
        .bind(address_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            "DELETE FROM tenants WHERE unit_id IN (SELECT id FROM units WHERE address_id = $1)",
        )
        .bind(address_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            "DELETE FROM photos WHERE unit_id IN (SELECT id FROM units WHERE address_id = $1)",
        )
        .bind(address_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM maintenance_tickets
            WHERE unit_id IN (SELECT id FROM units WHERE address_id = $1)
            ",
        )
        .bind(address_id)
        .execute(&mut **tx)
        .await?;

        sqlx::query("DELETE FROM units WHERE address_id = $1")
            .bind(address_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("DELETE FROM property_addresses WHERE id = $1")
            .bind(address_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Convert a database row to a Property struct
    fn row_to_property(row: &sqlx::sqlite::SqliteRow) -> Result<Property> {
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
    }

    /// Convert a database row to a PropertyAddress struct
    pub(super) fn row_to_address(row: &sqlx::sqlite::SqliteRow) -> Result<PropertyAddress> {
        let id: String = row.get("id");
        let property_id: String = row.get("property_id");
        Ok(PropertyAddress {
            id: Uuid::parse_str(&id)?,
            property_id: Uuid::parse_str(&property_id)?,
            street: row.get("street"),
            city: row.get("city"),
            state: row.get("state"),
            postal_code: row.get("postal_code"),
            is_primary: row.get("is_primary"),
            created_at: row.get("created_at"),
        })
    }
}
