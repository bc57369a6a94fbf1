/// Application routes configuration
use crate::handlers::{
    acknowledge_alert, check_weather, get_session, health, start_monitoring, stop_monitoring,
    AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Session state
        .route("/session", get(get_session))
        .route("/check", post(check_weather))
        .route("/alerts/:id/ack", post(acknowledge_alert))
        // Monitoring schedule
        .route("/monitoring/start", post(start_monitoring))
        .route("/monitoring/stop", post(stop_monitoring))
        .with_state(state)
}
