//! Account service implementation

use std::sync::Arc;

use common::error::{Error, ErrorExt, Result};
use common::model::account::Account;
use tracing::{debug, info};

use crate::repository::{AccountRepository, InMemoryAccountRepository, PostgresAccountRepository};

/// Account service wrapping whichever repository backs the store
///
/// None of the operations hold locks across calls: concurrent requests on the
/// same account interleave however the backend orders them.
#[derive(Clone)]
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(crate::config::AccountServiceConfig),
}

impl AccountService {
    /// Create a new account service backed by memory
    pub fn new() -> Self {
        Self::with_repo(Arc::new(InMemoryAccountRepository::new()))
    }

    /// Create a service over an already constructed repository
    pub fn with_repo(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Create a new account service with a specific repository type
    ///
    /// The repository is initialized (tables created) before returning.
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn AccountRepository> = match repo_type {
            RepositoryType::InMemory => {
                Arc::new(InMemoryAccountRepository::new())
            },
            RepositoryType::Postgres(config) => {
                Arc::new(PostgresAccountRepository::with_config(&config).await?)
            }
        };

        repo.init().await
            .with_context(|| "Failed to initialize account storage")?;

        Ok(Self { repo })
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repo.list_accounts().await
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: i64) -> Result<Account> {
        self.repo.get_account(id).await?
            .ok_or(Error::AccountNotFound(id))
    }

    /// Create a new account
    pub async fn create_account(&self, first_name: &str, last_name: &str) -> Result<Account> {
        let account = self.repo.create_account(first_name, last_name).await?;
        info!("Created account {} with number {}", account.id, account.number);
        Ok(account)
    }

    /// Update the name fields of an account
    pub async fn update_account(&self, id: i64, first_name: &str, last_name: &str) -> Result<Account> {
        info!("Updating account {}", id);
        self.repo.update_account(id, first_name, last_name).await?
            .ok_or(Error::AccountNotFound(id))
    }

    /// Delete an account. Deleting an unknown id succeeds.
    pub async fn delete_account(&self, id: i64) -> Result<()> {
        info!("Deleting account {}", id);
        self.repo.delete_account(id).await
    }

    /// Overwrite the balance of `to_account` with `amount`
    ///
    /// No source account is debited.
    pub async fn transfer(&self, to_account: i64, amount: i64) -> Result<Account> {
        debug!("Transfer: setting balance of account {} to {}", to_account, amount);
        let account = self.repo.transfer(to_account, amount).await?
            .ok_or(Error::AccountNotFound(to_account))?;
        info!("Balance of account {} set to {}", account.id, account.balance);
        Ok(account)
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}
