// Domain layer: the account entity and the ports it talks to.

pub mod model;
pub mod ports;

pub use model::{Account, AccountId, User, NOTIFICATION_THRESHOLD, PAY_IN_LIMIT};
pub use ports::{AccountRepository, NotificationService};
