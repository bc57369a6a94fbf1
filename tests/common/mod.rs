//! In-memory stand-ins for the pipeline's collaborators.
#![allow(dead_code)]

use async_trait::async_trait;
use migraine_watch::clients::{NotificationSink, WeatherProvider};
use migraine_watch::domain::{
    Conditions, Coordinates, Notification, PredictionRecord, Sensitivity, UserProfile,
};
use migraine_watch::errors::{NotifyError, PersistenceError, WeatherError};
use migraine_watch::repo::{PredictionStore, ProfileStore};
use migraine_watch::services::{AlertDeps, FixedLocator, MonitoringSession, WeatherFetcher};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USER_ID: &str = "user-1";
pub const FALLBACK: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};
pub const CHECK_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Calm weather: scores zero at any sensitivity
pub fn calm(pressure: f64) -> Conditions {
    Conditions {
        temperature: 20.0,
        humidity: 50.0,
        pressure,
        conditions: "Clear".to_string(),
        uv_index: 3,
        wind_speed: 10.0,
    }
}

pub enum Reply {
    Ok(Conditions),
    Delayed(Duration, Conditions),
    Unreachable,
    Garbled,
}

/// Replays queued replies, then keeps answering with `default`
pub struct ScriptedWeather {
    replies: Mutex<VecDeque<Reply>>,
    default: Mutex<Conditions>,
    calls: AtomicUsize,
    last_at: Mutex<Option<Coordinates>>,
}

impl ScriptedWeather {
    pub fn new(default: Conditions) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            default: Mutex::new(default),
            calls: AtomicUsize::new(0),
            last_at: Mutex::new(None),
        })
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn set_default(&self, conditions: Conditions) {
        *self.default.lock().unwrap() = conditions;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_at(&self) -> Option<Coordinates> {
        *self.last_at.lock().unwrap()
    }
}

#[async_trait]
impl WeatherProvider for ScriptedWeather {
    async fn current_conditions(&self, at: Coordinates) -> Result<Conditions, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_at.lock().unwrap() = Some(at);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Ok(c)) => Ok(c),
            Some(Reply::Delayed(delay, c)) => {
                tokio::time::sleep(delay).await;
                Ok(c)
            }
            Some(Reply::Unreachable) => Err(WeatherError::Status(503)),
            Some(Reply::Garbled) => Err(WeatherError::Decode("missing pressure".to_string())),
            None => {
                let default = self.default.lock().unwrap().clone();
                Ok(default)
            }
        }
    }
}

pub struct FakeProfiles {
    profile: Mutex<Option<UserProfile>>,
}

impl FakeProfiles {
    pub fn new(profile: UserProfile) -> Arc<Self> {
        Arc::new(Self {
            profile: Mutex::new(Some(profile)),
        })
    }

    pub fn missing() -> Arc<Self> {
        Arc::new(Self {
            profile: Mutex::new(None),
        })
    }
}

#[async_trait]
impl ProfileStore for FakeProfiles {
    async fn load_profile(&self, user_id: &str) -> Result<UserProfile, PersistenceError> {
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| PersistenceError::ProfileNotFound(user_id.to_string()))
    }
}

#[derive(Default)]
pub struct FakePredictions {
    pub records: Mutex<Vec<PredictionRecord>>,
    pub fail: AtomicBool,
}

impl FakePredictions {
    pub fn failing() -> Arc<Self> {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn saved(&self) -> Vec<PredictionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionStore for FakePredictions {
    async fn save_prediction(&self, record: &PredictionRecord) -> Result<(), PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("connection refused".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub struct FakeNotifier {
    subscribed: bool,
    pub sent: Mutex<Vec<Notification>>,
}

impl FakeNotifier {
    pub fn new(subscribed: bool) -> Arc<Self> {
        Arc::new(Self {
            subscribed,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for FakeNotifier {
    fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub fn profile(sensitivity: Sensitivity) -> UserProfile {
    UserProfile {
        weather_sensitivity: sensitivity,
        ..Default::default()
    }
}

/// Everything a test may want to inspect after driving a session
pub struct Harness {
    pub session: MonitoringSession,
    pub weather: Arc<ScriptedWeather>,
    pub predictions: Arc<FakePredictions>,
    pub notifier: Arc<FakeNotifier>,
}

pub struct HarnessBuilder {
    weather: Arc<ScriptedWeather>,
    profiles: Arc<FakeProfiles>,
    predictions: Arc<FakePredictions>,
    notifier: Arc<FakeNotifier>,
    device: Option<Coordinates>,
    synthetic_fallback: bool,
}

impl HarnessBuilder {
    pub fn new(sensitivity: Sensitivity) -> Self {
        Self {
            weather: ScriptedWeather::new(calm(1015.0)),
            profiles: FakeProfiles::new(profile(sensitivity)),
            predictions: Arc::new(FakePredictions::default()),
            notifier: FakeNotifier::new(true),
            device: None,
            synthetic_fallback: true,
        }
    }

    pub fn profiles(mut self, profiles: Arc<FakeProfiles>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn predictions(mut self, predictions: Arc<FakePredictions>) -> Self {
        self.predictions = predictions;
        self
    }

    pub fn notifier(mut self, notifier: Arc<FakeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn device(mut self, at: Coordinates) -> Self {
        self.device = Some(at);
        self
    }

    pub fn synthetic_fallback(mut self, enabled: bool) -> Self {
        self.synthetic_fallback = enabled;
        self
    }

    pub fn build(self) -> Harness {
        let deps = AlertDeps {
            user_id: USER_ID.to_string(),
            profiles: self.profiles,
            predictions: self.predictions.clone(),
            notifier: self.notifier.clone(),
            locator: Arc::new(FixedLocator(self.device)),
            fetcher: WeatherFetcher::new(self.weather.clone(), self.synthetic_fallback),
            fallback_location: FALLBACK,
        };

        Harness {
            session: MonitoringSession::new(deps, CHECK_INTERVAL),
            weather: self.weather,
            predictions: self.predictions,
            notifier: self.notifier,
        }
    }
}
