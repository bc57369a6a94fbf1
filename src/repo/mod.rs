/// Repository layer for database operations
use crate::domain::{PredictionRecord, Sensitivity, UserProfile};
use crate::errors::PersistenceError;
use async_trait::async_trait;
use sqlx::PgPool;

/// Read access to the user profile
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self, user_id: &str) -> Result<UserProfile, PersistenceError>;
}

/// Append-only prediction log
#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn save_prediction(&self, record: &PredictionRecord) -> Result<(), PersistenceError>;
}

/// Profile repository
#[derive(Clone)]
pub struct ProfileRepo {
    pool: PgPool,
}

impl ProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepo {
    async fn load_profile(&self, user_id: &str) -> Result<UserProfile, PersistenceError> {
        let row = sqlx::query_as::<_, (Option<String>, Option<f64>, Option<f64>, bool)>(
            "SELECT weather_sensitivity, location_lat, location_lng, weather_alerts_enabled
             FROM user_profiles
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (sensitivity, location_lat, location_lng, weather_alerts_enabled) =
            row.ok_or_else(|| PersistenceError::ProfileNotFound(user_id.to_string()))?;

        Ok(UserProfile {
            weather_sensitivity: sensitivity
                .as_deref()
                .map(Sensitivity::from_str_lenient)
                .unwrap_or_default(),
            location_lat,
            location_lng,
            weather_alerts_enabled,
        })
    }
}

/// Prediction repository
#[derive(Clone)]
pub struct PredictionRepo {
    pool: PgPool,
}

impl PredictionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionStore for PredictionRepo {
    async fn save_prediction(&self, record: &PredictionRecord) -> Result<(), PersistenceError> {
        let weather = serde_json::to_value(&record.weather_snapshot)?;
        let triggers = serde_json::to_value(&record.triggers)?;

        sqlx::query(
            "INSERT INTO weather_predictions
                (user_id, risk_level, confidence, weather_snapshot, triggers,
                 recommendation, predicted_for)
             VALUES ($1,$2,$3,$4,$5,$6,$7)",
        )
        .bind(&record.user_id)
        .bind(record.risk_level)
        .bind(record.confidence)
        .bind(weather)
        .bind(triggers)
        .bind(&record.recommendation)
        .bind(record.predicted_for)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Initialize database tables
pub async fn init_db(pool: &PgPool) -> Result<(), PersistenceError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_profiles(
            user_id TEXT PRIMARY KEY,
            weather_sensitivity TEXT,
            location_lat DOUBLE PRECISION,
            location_lng DOUBLE PRECISION,
            weather_alerts_enabled BOOLEAN NOT NULL DEFAULT false
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS weather_predictions(
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL,
            risk_level INTEGER NOT NULL,
            confidence DOUBLE PRECISION NOT NULL,
            weather_snapshot JSONB NOT NULL,
            triggers JSONB NOT NULL,
            recommendation TEXT NOT NULL,
            predicted_for TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS ix_weather_predictions_user
         ON weather_predictions(user_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
