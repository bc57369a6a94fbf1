/// Risk pipeline services
pub mod alerts;
pub mod classifier;
pub mod fetcher;
pub mod location;
pub mod monitor;
pub mod scoring;
pub mod session;
pub mod toasts;

pub use alerts::{AlertDeps, AlertLifecycle, ALERT_HISTORY_CAP};
pub use classifier::{assess, classify, recommend};
pub use fetcher::WeatherFetcher;
pub use location::{resolve_location, CachedLocator, FixedLocator, Locator};
pub use monitor::MonitoringScheduler;
pub use scoring::score;
pub use session::MonitoringSession;
pub use toasts::{ToastLog, ToastSink};
