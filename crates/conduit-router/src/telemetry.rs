//! In-memory event telemetry.
//!
//! A small append-only recorder for counters and timings the router emits
//! while making decisions. Events also go to the `tracing` pipeline; this
//! store only serves in-process inspection and tests. There is no export
//! pipeline here.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::SystemTime;
use tracing::info;

/// One recorded observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// When the observation was recorded.
    pub at: SystemTime,
    /// The recorded value.
    pub value: f64,
}

/// Append-only event recorder.
#[derive(Debug, Default)]
pub struct Telemetry {
    events: Mutex<HashMap<String, Vec<Observation>>>,
}

impl Telemetry {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation for an event.
    pub fn record(&self, event: &str, value: f64) {
        info!(event = %event, value, "Telemetry");
        let observation = Observation { at: SystemTime::now(), value };
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push(observation);
    }

    /// Returns all observations recorded for one event.
    #[must_use]
    pub fn events(&self, event: &str) -> Vec<Observation> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns every recorded event with its observations.
    #[must_use]
    pub fn all_events(&self) -> HashMap<String, Vec<Observation>> {
        self.events.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}
