//! Periodic weather re-evaluation with single-instance start/stop.

use super::alerts::AlertLifecycle;
use super::toasts::ToastSink;
use crate::domain::ToastKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const MONITORING_STARTED_MESSAGE: &str = "Weather monitoring started";
pub const MONITORING_STOPPED_MESSAGE: &str = "Weather monitoring stopped";

struct ScheduledCheck {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct MonitoringScheduler {
    lifecycle: Arc<AlertLifecycle>,
    toasts: Arc<dyn ToastSink>,
    interval: Duration,
    task: Mutex<Option<ScheduledCheck>>,
    shut_down: AtomicBool,
}

impl MonitoringScheduler {
    pub fn new(
        lifecycle: Arc<AlertLifecycle>,
        toasts: Arc<dyn ToastSink>,
        interval: Duration,
    ) -> Self {
        Self {
            lifecycle,
            toasts,
            interval,
            task: Mutex::new(None),
            shut_down: AtomicBool::new(false),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ScheduledCheck>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_monitoring(&self) -> bool {
        self.slot().is_some()
    }

    /// Check once now, then every interval. Returns false if already
    /// running or after `shutdown`.
    pub async fn start(&self) -> bool {
        {
            let mut slot = self.slot();
            if self.shut_down.load(Ordering::SeqCst) {
                tracing::debug!("monitoring already shut down");
                return false;
            }
            if slot.is_some() {
                tracing::debug!("monitoring already running");
                return false;
            }

            let token = CancellationToken::new();
            let handle = tokio::spawn(run_schedule(
                self.lifecycle.clone(),
                self.interval,
                token.clone(),
            ));
            *slot = Some(ScheduledCheck { token, handle });
        }

        tracing::info!(
            user_id = %self.lifecycle.user_id(),
            interval_secs = self.interval.as_secs(),
            "weather monitoring started"
        );
        self.toasts.show(ToastKind::Info, MONITORING_STARTED_MESSAGE);

        self.lifecycle.check_weather().await;
        true
    }

    /// Cancel future ticks. A check already in flight runs to completion.
    /// Returns false if not running.
    pub fn stop(&self) -> bool {
        let Some(task) = self.slot().take() else {
            return false;
        };
        task.token.cancel();

        tracing::info!(user_id = %self.lifecycle.user_id(), "weather monitoring stopped");
        self.toasts.show(ToastKind::Info, MONITORING_STOPPED_MESSAGE);
        true
    }

    /// Cancel the schedule and wait for its task to exit. Later calls to
    /// `start` are refused.
    pub async fn shutdown(&self) {
        let task = {
            let mut slot = self.slot();
            self.shut_down.store(true, Ordering::SeqCst);
            slot.take()
        };
        if let Some(task) = task {
            task.token.cancel();
            if let Err(e) = task.handle.await {
                tracing::warn!(error = %e, "monitoring task ended abnormally");
            }
        }
    }
}

impl Drop for MonitoringScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.slot().take() {
            task.token.cancel();
        }
    }
}

async fn run_schedule(
    lifecycle: Arc<AlertLifecycle>,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("monitoring schedule cancelled");
                break;
            }
            _ = ticker.tick() => {
                lifecycle.check_weather().await;
            }
        }
    }
}
