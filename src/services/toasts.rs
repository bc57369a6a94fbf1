/// User-facing toast messages
use crate::domain::{Toast, ToastKind};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

const TOAST_LOG_CAP: usize = 50;

/// Fire-and-forget sink for short user-facing messages
pub trait ToastSink: Send + Sync {
    fn show(&self, kind: ToastKind, message: &str);
}

/// Keeps the most recent toasts, newest first
#[derive(Default)]
pub struct ToastLog {
    entries: Mutex<VecDeque<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent(&self) -> Vec<Toast> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Count of retained toasts of one kind
    pub fn count(&self, kind: ToastKind) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| t.kind == kind)
            .count()
    }
}

impl ToastSink for ToastLog {
    fn show(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => tracing::warn!(toast = message, "toast"),
            _ => tracing::info!(toast = message, ?kind, "toast"),
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(Toast {
            kind,
            message: message.to_string(),
            at: Utc::now(),
        });
        entries.truncate(TOAST_LOG_CAP);
    }
}
