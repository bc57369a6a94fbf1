/// One user's monitoring session: lifecycle, scheduler and toasts
use super::alerts::{AlertDeps, AlertLifecycle};
use super::monitor::MonitoringScheduler;
use super::toasts::ToastLog;
use crate::domain::{Alert, SessionView};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub struct MonitoringSession {
    lifecycle: Arc<AlertLifecycle>,
    scheduler: MonitoringScheduler,
    toasts: Arc<ToastLog>,
    auto_started: AtomicBool,
}

impl MonitoringSession {
    pub fn new(deps: AlertDeps, check_interval: Duration) -> Self {
        let toasts = Arc::new(ToastLog::new());
        let lifecycle = Arc::new(AlertLifecycle::new(deps, toasts.clone()));
        let scheduler =
            MonitoringScheduler::new(lifecycle.clone(), toasts.clone(), check_interval);

        Self {
            lifecycle,
            scheduler,
            toasts,
            auto_started: AtomicBool::new(false),
        }
    }

    pub fn lifecycle(&self) -> &AlertLifecycle {
        &self.lifecycle
    }

    pub fn toasts(&self) -> &ToastLog {
        &self.toasts
    }

    pub async fn view(&self) -> SessionView {
        SessionView {
            current_alert: self.lifecycle.current_alert().await,
            weather_data: self.lifecycle.weather().await,
            alerts: self.lifecycle.alerts().await,
            is_loading: self.lifecycle.is_loading().await,
            is_monitoring: self.scheduler.is_monitoring(),
            status: self.lifecycle.status().await,
            toasts: self.toasts.recent(),
        }
    }

    pub async fn check_weather(&self) -> Option<Alert> {
        self.lifecycle.check_weather().await
    }

    pub async fn acknowledge_alert(&self, id: Uuid) -> bool {
        self.lifecycle.acknowledge(id).await
    }

    pub async fn start_monitoring(&self) -> bool {
        self.scheduler.start().await
    }

    pub fn stop_monitoring(&self) -> bool {
        self.scheduler.stop()
    }

    pub fn is_monitoring(&self) -> bool {
        self.scheduler.is_monitoring()
    }

    /// Start monitoring if the stored preference asks for it. Only the
    /// first call per session does anything.
    pub async fn auto_start(&self) -> bool {
        if self.auto_started.swap(true, Ordering::SeqCst) {
            return false;
        }

        match self
            .lifecycle
            .profiles()
            .load_profile(self.lifecycle.user_id())
            .await
        {
            Ok(profile) if profile.weather_alerts_enabled => self.start_monitoring().await,
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(error = %e, "could not read alert preference, not auto-starting");
                false
            }
        }
    }

    /// Tear down: no further scheduled checks fire after this returns
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }
}
