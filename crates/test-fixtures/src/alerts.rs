use std::sync::Mutex;

use steward_core::models::{Decision, Severity};
use steward_core::traits::IAlertSink;

/// Records every alert and review request.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    notified: Mutex<Vec<(String, Severity)>>,
    reviews: Mutex<Vec<String>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(decision_id, severity)` pairs, in notification order.
    pub fn notified(&self) -> Vec<(String, Severity)> {
        self.notified.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Decision ids for which a review was requested.
    pub fn reviews(&self) -> Vec<String> {
        self.reviews.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl IAlertSink for RecordingAlertSink {
    fn notify(&self, decision: &Decision, severity: Severity) {
        if let Ok(mut n) = self.notified.lock() {
            n.push((decision.id().to_string(), severity));
        }
    }

    fn request_review(&self, decision: &Decision) {
        if let Ok(mut r) = self.reviews.lock() {
            r.push(decision.id().to_string());
        }
    }
}
