//! Scheduler start/stop semantics on a paused clock.

mod common;

use common::*;
use migraine_watch::domain::{Sensitivity, ToastKind, UserProfile};
use migraine_watch::services::monitor::{MONITORING_STARTED_MESSAGE, MONITORING_STOPPED_MESSAGE};
use std::time::Duration;

const JUST_AFTER: Duration = Duration::from_secs(1);

#[tokio::test(start_paused = true)]
async fn test_start_is_idempotent_and_checks_immediately() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();

    assert!(h.session.start_monitoring().await);
    assert!(!h.session.start_monitoring().await);

    assert!(h.session.is_monitoring());
    assert_eq!(h.weather.calls(), 1);
    assert_eq!(h.session.toasts().count(ToastKind::Info), 1);
    assert_eq!(
        h.session.toasts().recent()[0].message,
        MONITORING_STARTED_MESSAGE
    );

    tokio::time::sleep(CHECK_INTERVAL + JUST_AFTER).await;
    assert_eq!(h.weather.calls(), 2);

    tokio::time::sleep(CHECK_INTERVAL).await;
    assert_eq!(h.weather.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_twice_is_safe() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    h.session.start_monitoring().await;

    assert!(h.session.stop_monitoring());
    assert!(!h.session.stop_monitoring());
    assert!(!h.session.is_monitoring());

    let toasts = h.session.toasts().recent();
    assert_eq!(toasts[0].message, MONITORING_STOPPED_MESSAGE);
    assert_eq!(h.session.toasts().count(ToastKind::Info), 2);

    tokio::time::sleep(CHECK_INTERVAL * 3).await;
    assert_eq!(h.weather.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_start_is_noop() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    assert!(!h.session.stop_monitoring());
    assert!(h.session.toasts().recent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    h.session.start_monitoring().await;
    h.session.stop_monitoring();

    assert!(h.session.start_monitoring().await);
    assert_eq!(h.weather.calls(), 2);

    tokio::time::sleep(CHECK_INTERVAL + JUST_AFTER).await;
    assert_eq!(h.weather.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_check_completes_after_stop() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    h.session.start_monitoring().await;
    let first = h.session.view().await.current_alert.unwrap();

    h.weather
        .push(Reply::Delayed(Duration::from_secs(60), calm(1000.0)));
    tokio::time::sleep(CHECK_INTERVAL + JUST_AFTER).await;
    assert_eq!(h.weather.calls(), 2);
    assert!(h.session.view().await.is_loading);

    assert!(h.session.stop_monitoring());
    tokio::time::sleep(Duration::from_secs(120)).await;

    let view = h.session.view().await;
    assert!(!view.is_loading);
    assert!(!view.is_monitoring);
    assert_ne!(view.current_alert.unwrap().id, first.id);

    tokio::time::sleep(CHECK_INTERVAL * 2).await;
    assert_eq!(h.weather.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_auto_start_runs_once_when_enabled() {
    let enabled = UserProfile {
        weather_alerts_enabled: true,
        ..profile(Sensitivity::Medium)
    };
    let h = HarnessBuilder::new(Sensitivity::Medium)
        .profiles(FakeProfiles::new(enabled))
        .build();

    assert!(h.session.auto_start().await);
    assert!(h.session.is_monitoring());

    h.session.stop_monitoring();
    assert!(!h.session.auto_start().await);
    assert!(!h.session.is_monitoring());
}

#[tokio::test(start_paused = true)]
async fn test_auto_start_respects_disabled_preference() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();

    assert!(!h.session.auto_start().await);
    assert!(!h.session.is_monitoring());
    assert_eq!(h.weather.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_schedule() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    h.session.start_monitoring().await;

    h.session.shutdown().await;
    assert!(!h.session.is_monitoring());

    tokio::time::sleep(CHECK_INTERVAL * 3).await;
    assert_eq!(h.weather.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_start_after_shutdown_is_refused() {
    let enabled = UserProfile {
        weather_alerts_enabled: true,
        ..profile(Sensitivity::Medium)
    };
    let h = HarnessBuilder::new(Sensitivity::Medium)
        .profiles(FakeProfiles::new(enabled))
        .build();

    h.session.shutdown().await;

    assert!(!h.session.auto_start().await);
    assert!(!h.session.start_monitoring().await);
    assert!(!h.session.is_monitoring());
    assert_eq!(h.session.toasts().count(ToastKind::Info), 0);

    tokio::time::sleep(CHECK_INTERVAL * 3).await;
    assert_eq!(h.weather.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_session_cancels_schedule() {
    let h = HarnessBuilder::new(Sensitivity::Medium).build();
    h.session.start_monitoring().await;
    let weather = h.weather.clone();

    drop(h);

    tokio::time::sleep(CHECK_INTERVAL * 3).await;
    assert_eq!(weather.calls(), 1);
}
