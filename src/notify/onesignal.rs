use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{NotificationMessage, Notifier};
use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://onesignal.com/api/v1/notifications";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneSignalConfig {
    pub app_id: String,
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Serialize)]
struct CreateNotificationRequest<'a> {
    app_id: &'a str,
    include_player_ids: [&'a str; 1],
    headings: &'a HashMap<String, String>,
    contents: &'a HashMap<String, String>,
}

/// Sends notifications through the OneSignal REST API.
pub struct OneSignalNotifier {
    client: reqwest::Client,
    config: OneSignalConfig,
}

impl OneSignalNotifier {
    pub fn new(config: OneSignalConfig) -> Result<Self> {
        if config.app_id.is_empty() || config.api_key.is_empty() {
            return Err(Error::Config(
                "OneSignal app id and api key are required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Notifier for OneSignalNotifier {
    async fn send(&self, message: &NotificationMessage) -> Result<()> {
        let body = CreateNotificationRequest {
            app_id: &self.config.app_id,
            include_player_ids: [message.recipient.as_str()],
            headings: &message.headings,
            contents: &message.contents,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.config.api_key),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Notification(format!(
                "OneSignal returned {status}: {text}"
            )));
        }

        tracing::debug!(recipient = %message.recipient, "Notification delivered to OneSignal");
        Ok(())
    }
}
