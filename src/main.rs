/// Service entry point: one monitoring session per process
use migraine_watch::clients::{LogNotifier, NotificationSink, WeatherClient, WebhookNotifier};
use migraine_watch::config::AppConfig;
use migraine_watch::handlers::AppState;
use migraine_watch::repo::{init_db, PredictionRepo, ProfileRepo};
use migraine_watch::routes::build_router;
use migraine_watch::services::{
    AlertDeps, CachedLocator, FixedLocator, MonitoringSession, WeatherFetcher,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established");

    init_db(&pool).await?;
    info!("Database schema initialized");

    // Clients
    let weather_client = WeatherClient::new(
        config.weather.api_url.clone(),
        config.weather.api_key.clone(),
    )?;
    info!(url = %weather_client.base_url(), "Weather provider configured");

    let notifier: Arc<dyn NotificationSink> = match &config.notify_webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(url.clone())?),
        None => Arc::new(LogNotifier),
    };

    let locator = CachedLocator::new(
        Arc::new(FixedLocator(config.location.device)),
        config.location.lookup_timeout,
        config.location.cache_max_age,
    );

    let deps = AlertDeps {
        user_id: config.user_id.clone(),
        profiles: Arc::new(ProfileRepo::new(pool.clone())),
        predictions: Arc::new(PredictionRepo::new(pool.clone())),
        notifier,
        locator: Arc::new(locator),
        fetcher: WeatherFetcher::new(
            Arc::new(weather_client),
            config.weather.synthetic_fallback,
        ),
        fallback_location: config.location.fallback,
    };

    let session = Arc::new(MonitoringSession::new(
        deps,
        config.monitoring.check_interval,
    ));

    // Auto-start when the stored preference enables weather alerts
    if session.auto_start().await {
        info!("Weather monitoring auto-started from profile preference");
    }

    let app = build_router(AppState {
        session: session.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("migraine_watch listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    session.shutdown().await;
    info!("Monitoring session shut down");

    Ok(())
}
