// ABOUTME: Ledger persistence: account types, accounts, transaction types, and transactions
// ABOUTME: Account and transaction types are protected from deletion while referenced

use super::Database;
use crate::models::{
    Account, AccountType, CreateAccountRequest, CreateNamedTypeRequest, CreateTransactionRequest,
    Transaction, TransactionType, UpdateAccountRequest, UpdateNamedTypeRequest,
    UpdateTransactionRequest,
};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create ledger tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_ledger(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS account_types (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                account_type_id TEXT NOT NULL REFERENCES account_types(id),
                name TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS transaction_types (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                account_id TEXT NOT NULL REFERENCES accounts(id),
                property_id TEXT NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
                transaction_type_id TEXT REFERENCES transaction_types(id),
                amount REAL NOT NULL,
                memo TEXT,
                transaction_date DATE NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_transactions_property ON transactions(property_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Account types ───────────────────────────────────────────────────

    /// Create an account type
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (duplicate names conflict)
    pub async fn create_account_type(&self, request: &CreateNamedTypeRequest) -> Result<AccountType> {
        let account_type = AccountType {
            id: Uuid::new_v4(),
            name: request.name.clone(),
        };

        sqlx::query("INSERT INTO account_types (id, name) VALUES ($1, $2)")
            .bind(account_type.id.to_string())
            .bind(&account_type.name)
            .execute(&self.pool)
            .await?;

        Ok(account_type)
    }

    /// Get one account type by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_account_type(&self, id: Uuid) -> Result<Option<AccountType>> {
        let row = sqlx::query("SELECT id, name FROM account_types WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_named_type(&row).map(|(id, name)| AccountType { id, name }))
            .transpose()
    }

    /// List all account types
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_account_types(&self) -> Result<Vec<AccountType>> {
        let rows = sqlx::query("SELECT id, name FROM account_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Self::row_to_named_type(row).map(|(id, name)| AccountType { id, name }))
            .collect()
    }

    /// Rename an account type
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_account_type(
        &self,
        id: Uuid,
        request: &UpdateNamedTypeRequest,
    ) -> Result<Option<AccountType>> {
        let updated = sqlx::query("UPDATE account_types SET name = COALESCE($2, name) WHERE id = $1")
            .bind(id.to_string())
            .bind(request.name.as_deref())
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_account_type(id).await
    }

    /// Delete an account type; fails while accounts still reference it
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_account_type(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM account_types WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    // ── Accounts ────────────────────────────────────────────────────────

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including an unknown type)
    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO accounts (id, account_type_id, name) VALUES ($1, $2, $3)")
            .bind(id.to_string())
            .bind(request.account_type_id.to_string())
            .bind(&request.name)
            .execute(&self.pool)
            .await?;

        self.get_account(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("account vanished after insert"))
    }

    /// Get one account by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_account(&self, id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, account_type_id, name, created_at FROM accounts WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_account(&row)).transpose()
    }

    /// List all accounts
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, account_type_id, name, created_at FROM accounts ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_account).collect()
    }

    /// Update an account; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_account(
        &self,
        id: Uuid,
        request: &UpdateAccountRequest,
    ) -> Result<Option<Account>> {
        let updated = sqlx::query(
            r"
            UPDATE accounts SET
                account_type_id = COALESCE($2, account_type_id),
                name = COALESCE($3, name)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.account_type_id.map(|v| v.to_string()))
        .bind(request.name.as_deref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_account(id).await
    }

    /// Delete an account; fails while transactions still reference it
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_account(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    // ── Transaction types ───────────────────────────────────────────────

    /// Create a transaction type
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (duplicate names conflict)
    pub async fn create_transaction_type(
        &self,
        request: &CreateNamedTypeRequest,
    ) -> Result<TransactionType> {
        let transaction_type = TransactionType {
            id: Uuid::new_v4(),
            name: request.name.clone(),
        };

        sqlx::query("INSERT INTO transaction_types (id, name) VALUES ($1, $2)")
            .bind(transaction_type.id.to_string())
            .bind(&transaction_type.name)
            .execute(&self.pool)
            .await?;

        Ok(transaction_type)
    }

    /// Get one transaction type by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_transaction_type(&self, id: Uuid) -> Result<Option<TransactionType>> {
        let row = sqlx::query("SELECT id, name FROM transaction_types WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_named_type(&row).map(|(id, name)| TransactionType { id, name }))
            .transpose()
    }

    /// List all transaction types
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_transaction_types(&self) -> Result<Vec<TransactionType>> {
        let rows = sqlx::query("SELECT id, name FROM transaction_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Self::row_to_named_type(row).map(|(id, name)| TransactionType { id, name }))
            .collect()
    }

    /// Rename a transaction type
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_transaction_type(
        &self,
        id: Uuid,
        request: &UpdateNamedTypeRequest,
    ) -> Result<Option<TransactionType>> {
        let updated =
            sqlx::query("UPDATE transaction_types SET name = COALESCE($2, name) WHERE id = $1")
                .bind(id.to_string())
                .bind(request.name.as_deref())
                .execute(&self.pool)
                .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_transaction_type(id).await
    }

    /// Delete a transaction type; fails while transactions still reference it
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_transaction_type(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM transaction_types WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    // ── Transactions ────────────────────────────────────────────────────

    /// Record a transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including unknown references)
    pub async fn create_transaction(&self, request: &CreateTransactionRequest) -> Result<Transaction> {
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO transactions
                (id, account_id, property_id, transaction_type_id, amount, memo, transaction_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(request.account_id.to_string())
        .bind(request.property_id.to_string())
        .bind(request.transaction_type_id.map(|v| v.to_string()))
        .bind(request.amount)
        .bind(request.memo.as_deref())
        .bind(request.transaction_date)
        .execute(&self.pool)
        .await?;

        self.get_transaction(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("transaction vanished after insert"))
    }

    /// Get one transaction by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r"
            SELECT id, account_id, property_id, transaction_type_id, amount, memo,
                   transaction_date, created_at
            FROM transactions WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_transaction(&row)).transpose()
    }

    /// List all transactions
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r"
            SELECT id, account_id, property_id, transaction_type_id, amount, memo,
                   transaction_date, created_at
            FROM transactions ORDER BY transaction_date, created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Update a transaction; absent fields keep their current values
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_transaction(
        &self,
        id: Uuid,
        request: &UpdateTransactionRequest,
    ) -> Result<Option<Transaction>> {
        let updated = sqlx::query(
            r"
            UPDATE transactions SET
                account_id = COALESCE($2, account_id),
                property_id = COALESCE($3, property_id),
                transaction_type_id = COALESCE($4, transaction_type_id),
                amount = COALESCE($5, amount),
                memo = COALESCE($6, memo),
                transaction_date = COALESCE($7, transaction_date)
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .bind(request.account_id.map(|v| v.to_string()))
        .bind(request.property_id.map(|v| v.to_string()))
        .bind(request.transaction_type_id.map(|v| v.to_string()))
        .bind(request.amount)
        .bind(request.memo.as_deref())
        .bind(request.transaction_date)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_transaction(id).await
    }

    /// Delete a transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_transaction(&self, id: Uuid) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }

    /// Decode an (id, name) row shared by both named-type tables
    fn row_to_named_type(row: &sqlx::sqlite::SqliteRow) -> Result<(Uuid, String)> {
        let id: String = row.get("id");
        Ok((Uuid::parse_str(&id)?, row.get("name")))
    }

    /// Convert a database row to an Account struct
    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let id: String = row.get("id");
        let account_type_id: String = row.get("account_type_id");
        Ok(Account {
            id: Uuid::parse_str(&id)?,
            account_type_id: Uuid::parse_str(&account_type_id)?,
            name: row.get("name"),
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a Transaction struct
    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let id: String = row.get("id");
        let account_id: String = row.get("account_id");
        let property_id: String = row.get("property_id");
        let transaction_type_id: Option<String> = row.get("transaction_type_id");
        Ok(Transaction {
            id: Uuid::parse_str(&id)?,
            account_id: Uuid::parse_str(&account_id)?,
            property_id: Uuid::parse_str(&property_id)?,
            transaction_type_id: transaction_type_id
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()?,
            amount: row.get("amount"),
            memo: row.get("memo"),
            transaction_date: row.get("transaction_date"),
            created_at: row.get("created_at"),
        })
    }
}
