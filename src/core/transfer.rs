use crate::core::locks::AccountLocks;
use crate::core::{AccountRepository, NotificationService};
use crate::domain::model::{Account, AccountId};
use crate::utils::error::{MoneyboxError, Result};
use rust_decimal::Decimal;

/// Both sides of a completed transfer, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub payer: Account,
    pub payee: Account,
    pub amount: Decimal,
}

pub struct TransferMoney<R: AccountRepository, N: NotificationService> {
    account_repository: R,
    notification_service: N,
    locks: AccountLocks,
}

impl<R: AccountRepository, N: NotificationService> TransferMoney<R, N> {
    /// Uses a private lock registry: this instance serializes its own
    /// transfers, but other use cases on the same store are not locked
    /// against it. Pass a shared registry through [`Self::with_locks`] for that.
    pub fn new(account_repository: R, notification_service: N) -> Self {
        Self {
            account_repository,
            notification_service,
            locks: AccountLocks::new(),
        }
    }

    pub fn with_locks(mut self, locks: AccountLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Moves `amount` from the payer to the payee.
    ///
    /// Both accounts are changed in memory first; the repository is only
    /// written once the withdrawal and the pay-in have both succeeded, and
    /// then through a single `update_many` call (payer first).
    #[tracing::instrument(
        name = "transfer_money",
        skip_all,
        fields(payer_id = %payer_id, payee_id = %payee_id, amount = %amount)
    )]
    pub async fn execute(
        &self,
        payer_id: AccountId,
        payee_id: AccountId,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        if payer_id == payee_id {
            tracing::warn!("Transfer to the same account rejected");
            return Err(MoneyboxError::SameAccount { id: payer_id });
        }

        let _guards = self.locks.acquire_all(&[payer_id, payee_id]).await;

        let mut payer = self.account_repository.get_account_by_id(&payer_id).await?;
        let mut payee = self.account_repository.get_account_by_id(&payee_id).await?;
        tracing::debug!(
            payer_balance = %payer.balance(),
            payee_paid_in = %payee.paid_in(),
            "Accounts loaded"
        );

        if let Err(e) = payer.withdraw(amount, &self.notification_service).await {
            tracing::warn!(error = %e, "Transfer rejected on payer side");
            return Err(e);
        }

        if let Err(e) = payee.pay_in(amount, &self.notification_service).await {
            tracing::warn!(error = %e, "Transfer rejected on payee side");
            return Err(e);
        }

        self.account_repository
            .update_many(&[&payer, &payee])
            .await?;

        tracing::info!(
            payer_balance = %payer.balance(),
            payee_balance = %payee.balance(),
            "Transfer completed"
        );
        Ok(TransferReceipt {
            payer,
            payee,
            amount,
        })
    }
}
