//! Location resolution: stored profile coordinates first, then the
//! device position (bounded lookup, short-lived cache), then a fixed
//! fallback coordinate.

use crate::domain::{Coordinates, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Something that can report the device's current position
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Option<Coordinates>;
}

/// Locator that always reports the same position, or none
pub struct FixedLocator(pub Option<Coordinates>);

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Wraps a locator with a lookup timeout and a position cache
pub struct CachedLocator {
    inner: Arc<dyn Locator>,
    timeout: Duration,
    max_age: Duration,
    cached: Mutex<Option<(Coordinates, Instant)>>,
}

impl CachedLocator {
    pub fn new(inner: Arc<dyn Locator>, timeout: Duration, max_age: Duration) -> Self {
        Self {
            inner,
            timeout,
            max_age,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Locator for CachedLocator {
    async fn current_position(&self) -> Option<Coordinates> {
        let mut cached = self.cached.lock().await;
        if let Some((coords, at)) = *cached {
            if at.elapsed() <= self.max_age {
                return Some(coords);
            }
        }

        match tokio::time::timeout(self.timeout, self.inner.current_position()).await {
            Ok(Some(coords)) => {
                *cached = Some((coords, Instant::now()));
                Some(coords)
            }
            Ok(None) => {
                tracing::debug!("device position unavailable");
                None
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.timeout, "device position lookup timed out");
                None
            }
        }
    }
}

/// Pick the coordinate a weather check should use
pub async fn resolve_location(
    profile: &UserProfile,
    locator: &dyn Locator,
    fallback: Coordinates,
) -> Coordinates {
    if let Some(stored) = profile.coordinates() {
        return stored;
    }
    if let Some(device) = locator.current_position().await {
        return device;
    }
    tracing::debug!(lat = fallback.lat, lng = fallback.lng, "using fallback location");
    fallback
}
