use super::{HttpClient, NotificationSink};
use crate::domain::Notification;
use crate::errors::NotifyError;
use async_trait::async_trait;

/// Delivers notifications by POSTing them as JSON to a webhook
pub struct WebhookNotifier {
    http_client: HttpClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: HttpClient::new()?,
            url,
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    fn is_subscribed(&self) -> bool {
        true
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), NotifyError> {
        let resp = self
            .http_client
            .get_client()
            .post(&self.url)
            .json(notification)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(NotifyError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// Sink used when no push channel is configured
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    fn is_subscribed(&self) -> bool {
        false
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(title = %notification.title, "notification dropped, no push channel");
        Err(NotifyError::NotSubscribed)
    }
}
