/// External API clients module
mod notify;
mod weather;

pub use notify::{LogNotifier, WebhookNotifier};
pub use weather::{parse_conditions, WeatherClient};

use crate::domain::{Conditions, Coordinates, Notification};
use crate::errors::{NotifyError, WeatherError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with common configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("migraine-watch/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Source of current atmospheric conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, at: Coordinates) -> Result<Conditions, WeatherError>;
}

/// Push/local notification sink
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Whether the user has granted permission and subscribed
    fn is_subscribed(&self) -> bool;

    async fn show_notification(&self, notification: &Notification) -> Result<(), NotifyError>;
}
