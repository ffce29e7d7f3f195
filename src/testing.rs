//! Fixtures for building accounts in tests.

use rust_decimal::Decimal;

use crate::domain::model::{Account, AccountId, User};

#[derive(Debug, Clone)]
pub struct AccountBuilder {
    id: AccountId,
    email: String,
    balance: Decimal,
    withdrawn: Decimal,
    paid_in: Decimal,
}

impl AccountBuilder {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            email: String::new(),
            balance: Decimal::ZERO,
            withdrawn: Decimal::ZERO,
            paid_in: Decimal::ZERO,
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_withdrawn(mut self, withdrawn: Decimal) -> Self {
        self.withdrawn = withdrawn;
        self
    }

    pub fn with_paid_in(mut self, paid_in: Decimal) -> Self {
        self.paid_in = paid_in;
        self
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn build(&self) -> Account {
        Account::new(
            self.id,
            User::new(self.email.clone()),
            self.balance,
            self.withdrawn,
            self.paid_in,
        )
    }
}
