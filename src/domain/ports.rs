use crate::domain::model::{Account, AccountId};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `MoneyboxError::NotFound` when the id is unknown.
    async fn get_account_by_id(&self, id: &AccountId) -> Result<Account>;

    async fn update(&self, account: &Account) -> Result<()>;

    /// Persists several accounts as one unit of work.
    ///
    /// The default writes them one by one in order and is not atomic: if a
    /// later write fails, the earlier ones stay persisted. Stores that can
    /// commit atomically should override it.
    async fn update_many(&self, accounts: &[&Account]) -> Result<()> {
        for account in accounts {
            self.update(account).await?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify_funds_low(&self, email: &str) -> Result<()>;

    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<()>;
}
