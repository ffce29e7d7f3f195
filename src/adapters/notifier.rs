use crate::domain::ports::NotificationService;
use crate::utils::error::{MoneyboxError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FundsLow,
    ApproachingPayInLimit,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::FundsLow => write!(f, "funds low"),
            NotificationKind::ApproachingPayInLimit => write!(f, "approaching pay in limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub email: String,
    pub sent_at: DateTime<Utc>,
}

/// Emits every alert as a `warn` event. Useful when no delivery channel is
/// wired up yet.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationService for TracingNotifier {
    async fn notify_funds_low(&self, email: &str) -> Result<()> {
        tracing::warn!(recipient = %email, "Funds low");
        Ok(())
    }

    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<()> {
        tracing::warn!(recipient = %email, "Approaching pay in limit");
        Ok(())
    }
}

/// Keeps every alert in memory so callers can inspect what would have been
/// sent. Can be told to fail every delivery.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    failure: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    pub async fn count(&self, kind: NotificationKind) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }

    async fn record(&self, kind: NotificationKind, email: &str) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(MoneyboxError::Notification {
                message: format!("{} alert to {} failed: {}", kind, email, message),
            });
        }

        tracing::debug!(recipient = %email, %kind, "Recording notification");
        self.sent.lock().await.push(Notification {
            kind,
            email: email.to_string(),
            sent_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn notify_funds_low(&self, email: &str) -> Result<()> {
        self.record(NotificationKind::FundsLow, email).await
    }

    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<()> {
        self.record(NotificationKind::ApproachingPayInLimit, email)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_keeps_order_and_kind() {
        let notifier = RecordingNotifier::new();

        notifier.notify_funds_low("a@example.com").await.unwrap();
        notifier
            .notify_approaching_pay_in_limit("b@example.com")
            .await
            .unwrap();

        let sent = notifier.notifications().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].kind, NotificationKind::FundsLow);
        assert_eq!(sent[0].email, "a@example.com");
        assert_eq!(sent[1].kind, NotificationKind::ApproachingPayInLimit);
        assert!(sent[0].sent_at <= sent[1].sent_at);
    }

    #[tokio::test]
    async fn test_clones_share_the_same_log() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        handle.notify_funds_low("a@example.com").await.unwrap();

        assert_eq!(notifier.count(NotificationKind::FundsLow).await, 1);
    }

    #[tokio::test]
    async fn test_failing_notifier_records_nothing() {
        let notifier = RecordingNotifier::failing("gateway timeout");

        let err = notifier.notify_funds_low("a@example.com").await.unwrap_err();

        assert!(err.to_string().contains("gateway timeout"));
        assert!(notifier.notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_tracing_notifier_never_fails() {
        let notifier = TracingNotifier::new();
        assert!(notifier.notify_funds_low("a@example.com").await.is_ok());
        assert!(notifier
            .notify_approaching_pay_in_limit("a@example.com")
            .await
            .is_ok());
    }
}
