/// HTTP request handlers
use crate::domain::{Health, SessionView};
use crate::errors::{ApiError, ApiResult};
use crate::services::MonitoringSession;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<MonitoringSession>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Current alert, weather, history and monitoring flags
pub async fn get_session(State(state): State<AppState>) -> Json<SuccessResponse<SessionView>> {
    Json(SuccessResponse::new(state.session.view().await))
}

/// Run a weather check now
pub async fn check_weather(State(state): State<AppState>) -> Json<Value> {
    let alert = state.session.check_weather().await;
    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "checked": alert.is_some(),
        "alert": alert,
    }))))
}

/// Acknowledge an alert by id
pub async fn acknowledge_alert(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::InvalidInput(format!("invalid alert id: {}", id)))?;

    if !state.session.acknowledge_alert(id).await {
        return Err(ApiError::NotFound(format!("alert {}", id)));
    }
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({ "acknowledged": id })
    ))))
}

/// Begin periodic monitoring
pub async fn start_monitoring(State(state): State<AppState>) -> Json<Value> {
    let started = state.session.start_monitoring().await;
    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "started": started,
        "isMonitoring": state.session.is_monitoring(),
    }))))
}

/// Stop periodic monitoring
pub async fn stop_monitoring(State(state): State<AppState>) -> Json<Value> {
    let stopped = state.session.stop_monitoring();
    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "stopped": stopped,
        "isMonitoring": state.session.is_monitoring(),
    }))))
}
