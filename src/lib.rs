pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod utils;

pub use adapters::{InMemoryAccountRepository, RecordingNotifier, TracingNotifier};
pub use config::LedgerConfig;
pub use crate::core::{AccountLocks, TransferMoney, TransferReceipt, WithdrawMoney};
pub use domain::{
    Account, AccountId, AccountRepository, NotificationService, User, NOTIFICATION_THRESHOLD,
    PAY_IN_LIMIT,
};
pub use utils::error::{MoneyboxError, Result};
