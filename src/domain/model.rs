use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::ports::NotificationService;
use crate::utils::error::{MoneyboxError, Result};

/// Maximum cumulative amount an account may ever receive.
pub const PAY_IN_LIMIT: Decimal = Decimal::from_parts(4000, 0, 0, false, 0);

/// Low balance and remaining pay-in headroom below this trigger a notification.
pub const NOTIFICATION_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A customer account.
///
/// State changes only through [`Account::withdraw`] and [`Account::pay_in`].
/// Both validate before touching any field, so a failed call leaves the
/// account exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    user: User,
    balance: Decimal,
    withdrawn: Decimal,
    paid_in: Decimal,
}

impl Account {
    pub fn new(
        id: AccountId,
        user: User,
        balance: Decimal,
        withdrawn: Decimal,
        paid_in: Decimal,
    ) -> Self {
        Self {
            id,
            user,
            balance,
            withdrawn,
            paid_in,
        }
    }

    /// A fresh account with nothing paid in or withdrawn.
    pub fn open(id: AccountId, user: User) -> Self {
        Self::new(id, user, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Running total of money taken out. Never positive.
    pub fn withdrawn(&self) -> Decimal {
        self.withdrawn
    }

    pub fn paid_in(&self) -> Decimal {
        self.paid_in
    }

    pub fn pay_in_headroom(&self) -> Decimal {
        PAY_IN_LIMIT.saturating_sub(self.paid_in)
    }

    pub async fn withdraw<N>(&mut self, amount: Decimal, notifier: &N) -> Result<()>
    where
        N: NotificationService + ?Sized,
    {
        ensure_positive(amount)?;

        let new_balance = self
            .balance
            .checked_sub(amount)
            .filter(|balance| *balance >= Decimal::ZERO)
            .ok_or(MoneyboxError::InsufficientFunds)?;
        let new_withdrawn = self
            .withdrawn
            .checked_sub(amount)
            .ok_or(MoneyboxError::AmountOverflow { field: "withdrawn" })?;

        if new_balance < NOTIFICATION_THRESHOLD {
            notifier.notify_funds_low(self.user.email()).await?;
        }

        self.balance = new_balance;
        self.withdrawn = new_withdrawn;
        Ok(())
    }

    pub async fn pay_in<N>(&mut self, amount: Decimal, notifier: &N) -> Result<()>
    where
        N: NotificationService + ?Sized,
    {
        ensure_positive(amount)?;

        // A sum too large to represent is over the limit as well.
        let new_paid_in = self
            .paid_in
            .checked_add(amount)
            .filter(|paid_in| *paid_in <= PAY_IN_LIMIT)
            .ok_or(MoneyboxError::PayInLimitReached)?;
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or(MoneyboxError::AmountOverflow { field: "balance" })?;

        if PAY_IN_LIMIT.saturating_sub(new_paid_in) < NOTIFICATION_THRESHOLD {
            notifier
                .notify_approaching_pay_in_limit(self.user.email())
                .await?;
        }

        self.balance = new_balance;
        self.paid_in = new_paid_in;
        Ok(())
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(MoneyboxError::InvalidAmount { amount });
    }
    Ok(())
}
