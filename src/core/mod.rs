pub mod locks;
pub mod transfer;
pub mod withdraw;

pub use crate::domain::ports::{AccountRepository, NotificationService};
pub use crate::utils::error::Result;
pub use locks::{AccountGuard, AccountLocks};
pub use transfer::{TransferMoney, TransferReceipt};
pub use withdraw::WithdrawMoney;
