mod onesignal;

use std::collections::HashMap;

use async_trait::async_trait;

pub use onesignal::{
    DEFAULT_ENDPOINT as DEFAULT_ONESIGNAL_ENDPOINT, OneSignalConfig, OneSignalNotifier,
};
use crate::error::Result;

/// A push message for a single device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub recipient: String,
    /// Heading text keyed by locale.
    pub headings: HashMap<String, String>,
    /// Body text keyed by locale.
    pub contents: HashMap<String, String>,
}

impl NotificationMessage {
    #[must_use]
    pub fn english(recipient: impl Into<String>, heading: &str, content: &str) -> Self {
        Self {
            recipient: recipient.into(),
            headings: HashMap::from([("en".to_string(), heading.to_string())]),
            contents: HashMap::from([("en".to_string(), content.to_string())]),
        }
    }
}

/// Delivers push notifications. Implementations make one attempt and do not
/// retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<()>;
}

/// Notifier used when no push provider is configured. It only logs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &NotificationMessage) -> Result<()> {
        tracing::info!(
            recipient = %message.recipient,
            heading = ?message.headings.get("en"),
            "Push provider not configured, notification not sent"
        );
        Ok(())
    }
}
