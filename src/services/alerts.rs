//! Alert lifecycle for one monitoring session.
//!
//! Owns the only mutable state in the pipeline: the previous pressure
//! baseline, the current alert slot and the bounded alert history. Checks
//! are serialised so the baseline read in one check always happens before
//! it is overwritten for the next.

use super::classifier::assess;
use super::fetcher::WeatherFetcher;
use super::location::{resolve_location, Locator};
use super::toasts::ToastSink;
use crate::clients::NotificationSink;
use crate::domain::{
    Alert, CheckStatus, Coordinates, Notification, PredictionRecord, RiskLevel, ToastKind,
    UserProfile, WeatherSnapshot,
};
use crate::errors::CheckError;
use crate::repo::{PredictionStore, ProfileStore};
use crate::utils::truncate_chars;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Maximum number of non-low alerts retained
pub const ALERT_HISTORY_CAP: usize = 20;

const NOTIFICATION_BODY_CHARS: usize = 100;

pub const CHECK_FAILED_MESSAGE: &str = "Failed to check weather conditions";
pub const CRITICAL_RISK_MESSAGE: &str =
    "Critical migraine risk detected! Take preventive measures now.";

/// Collaborators a lifecycle needs
pub struct AlertDeps {
    pub user_id: String,
    pub profiles: Arc<dyn ProfileStore>,
    pub predictions: Arc<dyn PredictionStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub locator: Arc<dyn Locator>,
    pub fetcher: WeatherFetcher,
    pub fallback_location: Coordinates,
}

#[derive(Default)]
struct AlertState {
    status: CheckStatus,
    is_loading: bool,
    current: Option<Alert>,
    history: VecDeque<Alert>,
    weather: Option<WeatherSnapshot>,
    previous_pressure: Option<f64>,
}

pub struct AlertLifecycle {
    deps: AlertDeps,
    toasts: Arc<dyn ToastSink>,
    check_lock: Mutex<()>,
    state: RwLock<AlertState>,
}

impl AlertLifecycle {
    pub fn new(deps: AlertDeps, toasts: Arc<dyn ToastSink>) -> Self {
        Self {
            deps,
            toasts,
            check_lock: Mutex::new(()),
            state: RwLock::new(AlertState::default()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.deps.user_id
    }

    pub fn profiles(&self) -> &dyn ProfileStore {
        self.deps.profiles.as_ref()
    }

    /// Run one weather check. Never fails outward: on error the previous
    /// alert and history stay as they were and an error toast is shown.
    ///
    /// The check runs on its own task, so dropping the returned future
    /// does not abandon it halfway: the loading flag is still cleared and
    /// the prediction still saved.
    pub async fn check_weather(self: &Arc<Self>) -> Option<Alert> {
        let lifecycle = Arc::clone(self);
        let handle = tokio::spawn(async move { lifecycle.run_serialised_check().await });

        match handle.await {
            Ok(alert) => alert,
            Err(e) => {
                tracing::error!(
                    user_id = %self.deps.user_id,
                    error = %e,
                    "weather check task failed"
                );
                let mut state = self.state.write().await;
                state.is_loading = false;
                state.status = CheckStatus::Settled;
                None
            }
        }
    }

    async fn run_serialised_check(&self) -> Option<Alert> {
        let _check = self.check_lock.lock().await;

        {
            let mut state = self.state.write().await;
            state.status = CheckStatus::Checking;
            state.is_loading = true;
        }

        let alert = match self.run_check().await {
            Ok(alert) => Some(alert),
            Err(e) => {
                tracing::error!(user_id = %self.deps.user_id, error = %e, "weather check failed");
                self.toasts.show(ToastKind::Error, CHECK_FAILED_MESSAGE);
                None
            }
        };

        let mut state = self.state.write().await;
        state.is_loading = false;
        state.status = CheckStatus::Settled;
        alert
    }

    async fn run_check(&self) -> Result<Alert, CheckError> {
        let profile = match self.deps.profiles.load_profile(&self.deps.user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(
                    user_id = %self.deps.user_id,
                    error = %e,
                    "profile unavailable, checking with default settings"
                );
                UserProfile::default()
            }
        };
        let at = resolve_location(
            &profile,
            self.deps.locator.as_ref(),
            self.deps.fallback_location,
        )
        .await;

        let previous_pressure = self.state.read().await.previous_pressure;
        let weather = self.deps.fetcher.fetch(at, previous_pressure).await?;
        let assessment = assess(&weather, previous_pressure, profile.weather_sensitivity);
        let alert = Alert::new(assessment, weather);

        tracing::info!(
            alert_id = %alert.id,
            risk_level = %alert.risk_level,
            risk_score = alert.risk_score,
            source = ?alert.weather.source,
            triggers = alert.triggers.len(),
            "weather check complete"
        );

        self.settle(alert.clone()).await;
        self.persist(&alert).await;
        self.notify(&alert).await;

        Ok(alert)
    }

    async fn settle(&self, alert: Alert) {
        let mut state = self.state.write().await;
        state.previous_pressure = Some(alert.weather.pressure);
        state.weather = Some(alert.weather.clone());
        if alert.risk_level != RiskLevel::Low {
            state.history.push_front(alert.clone());
            state.history.truncate(ALERT_HISTORY_CAP);
        }
        state.current = Some(alert);
    }

    async fn persist(&self, alert: &Alert) {
        let record = PredictionRecord::from_alert(&self.deps.user_id, alert, Utc::now());
        if let Err(e) = self.deps.predictions.save_prediction(&record).await {
            tracing::warn!(alert_id = %alert.id, error = %e, "failed to store prediction");
        }
    }

    async fn notify(&self, alert: &Alert) {
        if alert.risk_level >= RiskLevel::High && self.deps.notifier.is_subscribed() {
            let notification = build_notification(alert);
            if let Err(e) = self.deps.notifier.show_notification(&notification).await {
                tracing::warn!(alert_id = %alert.id, error = %e, "failed to deliver notification");
            }
        }

        if alert.risk_level == RiskLevel::Critical {
            self.toasts.show(ToastKind::Warning, CRITICAL_RISK_MESSAGE);
        }
    }

    /// Mark an alert acknowledged in history and the current slot.
    /// Returns false when no alert has that id.
    pub async fn acknowledge(&self, id: Uuid) -> bool {
        let mut state = self.state.write().await;
        let mut found = false;

        if let Some(entry) = state.history.iter_mut().find(|a| a.id == id) {
            entry.acknowledged = true;
            found = true;
        }
        if let Some(current) = state.current.as_mut().filter(|a| a.id == id) {
            current.acknowledged = true;
            found = true;
        }

        if !found {
            tracing::debug!(alert_id = %id, "acknowledge for unknown alert ignored");
        }
        found
    }

    pub async fn current_alert(&self) -> Option<Alert> {
        self.state.read().await.current.clone()
    }

    /// History, newest first
    pub async fn alerts(&self) -> Vec<Alert> {
        self.state.read().await.history.iter().cloned().collect()
    }

    pub async fn weather(&self) -> Option<WeatherSnapshot> {
        self.state.read().await.weather.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn status(&self) -> CheckStatus {
        self.state.read().await.status
    }

    pub async fn previous_pressure(&self) -> Option<f64> {
        self.state.read().await.previous_pressure
    }
}

/// Push notification for a high or critical alert
pub fn build_notification(alert: &Alert) -> Notification {
    let headline = alert
        .triggers
        .first()
        .map(String::as_str)
        .unwrap_or("Weather conditions changed");

    Notification {
        title: format!(
            "Migraine Risk Alert: {}",
            alert.risk_level.as_str().to_uppercase()
        ),
        body: format!(
            "{}. {}",
            headline,
            truncate_chars(&alert.recommendation, NOTIFICATION_BODY_CHARS)
        ),
        data: serde_json::json!({
            "alertId": alert.id,
            "riskLevel": alert.risk_level,
            "riskScore": alert.risk_score,
        }),
    }
}
