//! Repository for account data

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::db::{create_account_table, init_db_pool, DbPool};
use common::error::Result;
use common::model::account::Account;
use dashmap::DashMap;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, info};

/// Account repository trait defining the interface for account data storage
///
/// Lookups return `Ok(None)` when no row matches; turning that into a
/// not-found error is left to the service.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Prepare the backing storage (create tables and the like)
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Get all accounts
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Get an account by ID
    async fn get_account(&self, id: i64) -> Result<Option<Account>>;

    /// Create a new account; number, balance and timestamp are assigned here
    async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account>;

    /// Overwrite the name fields, returning the row as stored afterwards
    async fn update_account(&self, id: i64, first_name: &str, last_name: &str) -> Result<Option<Account>>;

    /// Delete an account; unknown ids are not an error
    async fn delete_account(&self, id: i64) -> Result<()>;

    /// Set the balance of an account to `amount`, returning the updated row
    async fn transfer(&self, to_account: i64, amount: i64) -> Result<Option<Account>>;
}

/// In-memory repository for account data
///
/// Mirrors the serial columns of the SQL table: id, number and balance each
/// draw from their own counter starting at 1.
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    pub accounts: DashMap<i64, Account>,
    next_id: AtomicI64,
    next_number: AtomicI64,
    next_balance: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicI64::new(1),
            next_number: AtomicI64::new(1),
            next_balance: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account> {
        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            number: self.next_number.fetch_add(1, Ordering::SeqCst),
            balance: self.next_balance.fetch_add(1, Ordering::SeqCst),
            created_at: Utc::now(),
        };

        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_account(&self, id: i64, first_name: &str, last_name: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get_mut(&id).map(|mut entry| {
            entry.first_name = first_name.to_string();
            entry.last_name = last_name.to_string();
            entry.clone()
        }))
    }

    async fn delete_account(&self, id: i64) -> Result<()> {
        self.accounts.remove(&id);
        Ok(())
    }

    async fn transfer(&self, to_account: i64, amount: i64) -> Result<Option<Account>> {
        Ok(self.accounts.get_mut(&to_account).map(|mut entry| {
            entry.balance = amount;
            entry.clone()
        }))
    }
}

/// PostgreSQL repository for account data
pub struct PostgresAccountRepository {
    /// Database connection pool
    pool: DbPool,
}

impl PostgresAccountRepository {
    /// Wrap an existing connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new PostgreSQL account repository with configuration
    pub async fn with_config(config: &crate::config::AccountServiceConfig) -> Result<Self> {
        let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
        Ok(Self::new(pool))
    }
}

fn scan_into_account(row: &PgRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        number: row.try_get("number")?,
        balance: row.try_get("balance")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn init(&self) -> Result<()> {
        create_account_table(&self.pool).await?;
        info!("Account table ready");
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        debug!("Listing accounts from database");

        let rows = sqlx::query(
            "SELECT id, first_name, last_name, number, balance, created_at FROM account"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(scan_into_account).collect()
    }

    async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        debug!("Getting account from database: {}", id);

        let row = sqlx::query(
            "SELECT id, first_name, last_name, number, balance, created_at
             FROM account
             WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(scan_into_account).transpose()
    }

    async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account> {
        debug!("Creating new account in database");

        // number and balance are left to their sequences
        let row = sqlx::query(
            "INSERT INTO account (first_name, last_name, created_at)
             VALUES ($1, $2, $3)
             RETURNING id, first_name, last_name, number, balance, created_at"
        )
        .bind(first_name)
        .bind(last_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        scan_into_account(&row)
    }

    async fn update_account(&self, id: i64, first_name: &str, last_name: &str) -> Result<Option<Account>> {
        debug!("Updating account in database: {}", id);

        let row = sqlx::query(
            "UPDATE account SET first_name = $2, last_name = $3
             WHERE id = $1
             RETURNING id, first_name, last_name, number, balance, created_at"
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(scan_into_account).transpose()
    }

    async fn delete_account(&self, id: i64) -> Result<()> {
        debug!("Deleting account from database: {}", id);

        sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn transfer(&self, to_account: i64, amount: i64) -> Result<Option<Account>> {
        debug!("Setting balance of account {} to {}", to_account, amount);

        let row = sqlx::query(
            "UPDATE account SET balance = $1
             WHERE id = $2
             RETURNING id, first_name, last_name, number, balance, created_at"
        )
        .bind(amount)
        .bind(to_account)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(scan_into_account).transpose()
    }
}
