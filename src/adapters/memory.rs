use crate::config::LedgerConfig;
use crate::domain::model::{Account, AccountId};
use crate::domain::ports::AccountRepository;
use crate::utils::error::{MoneyboxError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local account store.
///
/// `update` only overwrites accounts that already exist. `update_many` checks
/// every id first and then writes them all under a single write lock, so a
/// transfer is either fully stored or not stored at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id(), account))
            .collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// Builds a repository from the `[[accounts]]` entries of a ledger file.
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!("Seeding {} account(s) from config", config.accounts.len());
        Ok(Self::with_accounts(config.accounts()))
    }

    /// Adds or replaces an account. Returns the previous version, if any.
    pub async fn insert(&self, account: Account) -> Option<Account> {
        self.accounts.write().await.insert(account.id(), account)
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    fn unknown(id: AccountId) -> MoneyboxError {
        MoneyboxError::Persistence {
            message: format!("cannot update unknown account {}", id),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get_account_by_id(&self, id: &AccountId) -> Result<Account> {
        let accounts = self.accounts.read().await;
        accounts
            .get(id)
            .cloned()
            .ok_or(MoneyboxError::NotFound { id: *id })
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let slot = accounts
            .get_mut(&account.id())
            .ok_or_else(|| Self::unknown(account.id()))?;
        *slot = account.clone();
        tracing::debug!(account_id = %account.id(), "Account stored");
        Ok(())
    }

    async fn update_many(&self, batch: &[&Account]) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        if let Some(missing) = batch.iter().find(|a| !accounts.contains_key(&a.id())) {
            return Err(Self::unknown(missing.id()));
        }

        for account in batch {
            accounts.insert(account.id(), (*account).clone());
        }
        tracing::debug!("Stored {} account(s) atomically", batch.len());
        Ok(())
    }
}
