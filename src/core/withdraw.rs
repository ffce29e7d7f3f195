use crate::core::locks::AccountLocks;
use crate::core::{AccountRepository, NotificationService};
use crate::domain::model::{Account, AccountId};
use crate::utils::error::Result;
use rust_decimal::Decimal;

pub struct WithdrawMoney<R: AccountRepository, N: NotificationService> {
    account_repository: R,
    notification_service: N,
    locks: AccountLocks,
}

impl<R: AccountRepository, N: NotificationService> WithdrawMoney<R, N> {
    /// Uses a private lock registry: this instance serializes its own
    /// withdrawals, but other use cases on the same store are not locked
    /// against it. Pass a shared registry through [`Self::with_locks`] for that.
    pub fn new(account_repository: R, notification_service: N) -> Self {
        Self {
            account_repository,
            notification_service,
            locks: AccountLocks::new(),
        }
    }

    /// Shares a lock registry with other use cases touching the same store.
    pub fn with_locks(mut self, locks: AccountLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Loads the account, withdraws `amount` and stores the result.
    ///
    /// Nothing is stored when the withdrawal is rejected.
    #[tracing::instrument(
        name = "withdraw_money",
        skip_all,
        fields(account_id = %account_id, amount = %amount)
    )]
    pub async fn execute(&self, account_id: AccountId, amount: Decimal) -> Result<Account> {
        let _guard = self.locks.acquire(&account_id).await;

        let mut account = self.account_repository.get_account_by_id(&account_id).await?;
        tracing::debug!(balance = %account.balance(), "Account loaded");

        if let Err(e) = account.withdraw(amount, &self.notification_service).await {
            tracing::warn!(error = %e, "Withdrawal rejected");
            return Err(e);
        }

        self.account_repository.update(&account).await?;

        tracing::info!(balance = %account.balance(), "Withdrawal completed");
        Ok(account)
    }
}
