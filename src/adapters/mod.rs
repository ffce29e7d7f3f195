// Adapters layer: concrete implementations of the domain ports.

pub mod memory;
pub mod notifier;

pub use memory::InMemoryAccountRepository;
pub use notifier::{Notification, NotificationKind, RecordingNotifier, TracingNotifier};
