//! Sliding-window usage accounting per model id.
//!
//! Tracks how many calls each model has received inside the current
//! one-hour window and answers whether a model is over its limit. Records
//! live in a bounded sharded lock table: the model id hashes to one of a
//! fixed number of shards, so the lock set never grows with the number of
//! model ids seen.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default per-model calls allowed inside one usage window.
pub const DEFAULT_CALL_LIMIT: u64 = 1000;

/// Length of the usage accounting window.
pub const USAGE_WINDOW: Duration = Duration::from_secs(3600);

/// Number of shards in the lock table.
const SHARD_COUNT: usize = 16;

/// Per-model call counter for the current window.
#[derive(Debug, Clone, Copy)]
struct UsageRecord {
    count: u64,
    window_start: Instant,
}

impl UsageRecord {
    fn new(now: Instant) -> Self {
        Self { count: 0, window_start: now }
    }

    /// Restarts the window if it has run its full length.
    fn roll_window(&mut self, now: Instant, window: Duration) {
        if now.duration_since(self.window_start) >= window {
            self.count = 0;
            self.window_start = now;
        }
    }
}

/// Per-model sliding-window call counter with configurable limits.
///
/// Counters are created lazily on first reference and are never persisted;
/// a restart starts every model from zero. Operations on different model
/// ids contend only when the ids hash to the same shard; operations on the
/// same id are always serialized. No I/O happens under any lock.
pub struct UsageTracker {
    shards: Vec<Mutex<HashMap<String, UsageRecord>>>,
    limits: RwLock<HashMap<String, u64>>,
    default_limit: u64,
    window: Duration,
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageTracker")
            .field("default_limit", &self.default_limit)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl UsageTracker {
    /// Creates a tracker with the default limit and a one-hour window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_limit(DEFAULT_CALL_LIMIT)
    }

    /// Creates a tracker with a custom default limit.
    ///
    /// # Arguments
    /// * `default_limit` - Calls allowed per window for models without an
    ///   explicit override
    #[must_use]
    pub fn with_default_limit(default_limit: u64) -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
            limits: RwLock::new(HashMap::new()),
            default_limit,
            window: USAGE_WINDOW,
        }
    }

    /// Overrides the call limit for one model id.
    pub fn set_limit(&self, model_id: &str, limit: u64) {
        debug!(model_id = %model_id, limit, "Overriding usage limit");
        self.limits
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(model_id.to_string(), limit);
    }

    /// Returns the effective call limit for a model id.
    #[must_use]
    pub fn limit(&self, model_id: &str) -> u64 {
        self.limits
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(model_id)
            .copied()
            .unwrap_or(self.default_limit)
    }

    /// Records one call against a model and returns the new in-window count.
    ///
    /// If the current window has expired, the counter resets to zero and the
    /// window restarts before the call is counted.
    pub fn increment(&self, model_id: &str) -> u64 {
        self.increment_at(model_id, Instant::now())
    }

    /// Returns whether a model has reached its limit in the current window.
    ///
    /// The threshold is inclusive: a model whose count equals its limit is
    /// limited. Performs the same window-expiry reset as `increment`.
    pub fn is_limited(&self, model_id: &str) -> bool {
        self.is_limited_at(model_id, Instant::now())
    }

    /// Returns the current in-window count for a model without mutating it.
    #[must_use]
    pub fn usage(&self, model_id: &str) -> u64 {
        let shard = self.shard(model_id);
        let records = shard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        records.get(model_id).map_or(0, |record| record.count)
    }

    fn increment_at(&self, model_id: &str, now: Instant) -> u64 {
        let shard = self.shard(model_id);
        let mut records = shard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = records.entry(model_id.to_string()).or_insert_with(|| UsageRecord::new(now));
        record.roll_window(now, self.window);
        record.count += 1;
        record.count
    }

    fn is_limited_at(&self, model_id: &str, now: Instant) -> bool {
        let limit = self.limit(model_id);
        let shard = self.shard(model_id);
        let mut records = shard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = records.entry(model_id.to_string()).or_insert_with(|| UsageRecord::new(now));
        record.roll_window(now, self.window);
        record.count >= limit
    }

    fn shard(&self, model_id: &str) -> &Mutex<HashMap<String, UsageRecord>> {
        let mut hasher = DefaultHasher::new();
        model_id.hash(&mut hasher);
        let index = (hasher.finish() as usize) % SHARD_COUNT;
        &self.shards[index]
    }
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::new()
    }
}
