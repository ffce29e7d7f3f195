use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::model::AccountId;

#[derive(Error, Debug)]
pub enum MoneyboxError {
    #[error("Insufficient funds to make transfer")]
    InsufficientFunds,

    #[error("Account pay in limit reached")]
    PayInLimitReached,

    #[error("Amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Amount too large: {field} would overflow")]
    AmountOverflow { field: &'static str },

    #[error("Cannot transfer from account {id} to itself")]
    SameAccount { id: AccountId },

    #[error("Account not found: {id}")]
    NotFound { id: AccountId },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Notification error: {message}")]
    Notification { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BusinessRule,
    NotFound,
    Infrastructure,
    Configuration,
}

impl MoneyboxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MoneyboxError::InsufficientFunds
            | MoneyboxError::PayInLimitReached
            | MoneyboxError::InvalidAmount { .. }
            | MoneyboxError::AmountOverflow { .. }
            | MoneyboxError::SameAccount { .. } => ErrorCategory::BusinessRule,
            MoneyboxError::NotFound { .. } => ErrorCategory::NotFound,
            MoneyboxError::Persistence { .. }
            | MoneyboxError::Notification { .. }
            | MoneyboxError::IoError(_) => ErrorCategory::Infrastructure,
            MoneyboxError::TomlError(_)
            | MoneyboxError::ConfigError { .. }
            | MoneyboxError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Business-rule rejections leave every account untouched, so the caller
    /// may retry with different input.
    pub fn is_business_rule(&self) -> bool {
        self.category() == ErrorCategory::BusinessRule
    }
}

pub type Result<T> = std::result::Result<T, MoneyboxError>;
