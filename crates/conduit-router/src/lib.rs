//! Task routing core for the Conduit gateway.
//!
//! Ties together the rule-based classifier, the static model selector, and
//! the usage tracker into one routing decision: which model id should serve
//! this prompt right now. The chosen id is a handle for the backend
//! dispatcher, which lives outside this crate.

pub mod classifier;
pub mod config;
pub mod registry;
pub mod selector;
pub mod telemetry;
pub mod usage;

use std::sync::Arc;
use tracing::{debug, info};

pub use classifier::{TaskLabel, classify};
pub use config::{ConfigError, GatewayConfig, ModelConfig};
pub use registry::{AgentDescriptor, HealthStatus, ModelDescriptor, ModelRegistry};
pub use selector::ModelSelector;
pub use telemetry::{Observation, Telemetry};
pub use usage::{DEFAULT_CALL_LIMIT, USAGE_WINDOW, UsageTracker};

/// One routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    /// The model id to dispatch to.
    pub model_id: String,
    /// The task label assigned to the prompt.
    pub task: TaskLabel,
    /// The model's in-window call count after this decision.
    pub calls_in_window: u64,
    /// Whether rotation substituted a different model than the first pick.
    pub rotated: bool,
}

/// Routing front door: classification, selection, and rotation-on-limit.
///
/// The limit is soft by design. When the selected model is over its window
/// limit the router re-selects once and prefers a differing candidate, but
/// if the candidate is the same model it dispatches to it anyway and still
/// counts the call. Nothing is ever refused for being over-limit.
#[derive(Debug)]
pub struct Router {
    selector: ModelSelector,
    usage: Arc<UsageTracker>,
    telemetry: Arc<Telemetry>,
}

impl Router {
    /// Creates a router from the static configuration.
    ///
    /// Per-model limit overrides declared in the configuration are applied
    /// to the tracker here, once.
    ///
    /// # Arguments
    /// * `config` - The static gateway configuration
    /// * `usage` - The shared usage tracker
    /// * `telemetry` - The shared telemetry recorder
    #[must_use]
    pub fn new(config: GatewayConfig, usage: Arc<UsageTracker>, telemetry: Arc<Telemetry>) -> Self {
        for model in &config.models {
            if let Some(limit) = model.max_calls_per_window {
                usage.set_limit(&model.id, limit);
            }
        }
        Self { selector: ModelSelector::new(config.models), usage, telemetry }
    }

    /// Returns the shared usage tracker.
    #[must_use]
    pub fn usage(&self) -> &Arc<UsageTracker> {
        &self.usage
    }

    /// Returns the shared telemetry recorder.
    #[must_use]
    pub fn telemetry(&self) -> &Arc<Telemetry> {
        &self.telemetry
    }

    /// Routes a prompt to a model id.
    ///
    /// Classifies the prompt, selects a model for the task, rotates away
    /// from a rate-limited pick when a different candidate exists, then
    /// counts the call against the dispatched model. Returns `None` only
    /// when no models are configured at all.
    ///
    /// # Arguments
    /// * `prompt` - The free-text request
    /// * `tags` - Caller-supplied preference tags, possibly empty
    pub fn route(&self, prompt: &str, tags: &[String]) -> Option<Routed> {
        let task = classify(prompt);
        let routed = self.route_task(task, tags);
        if routed.is_none() {
            debug!(task = %task, "No models configured, nothing to route to");
        }
        routed
    }

    /// Routes an already-classified task to a model id.
    ///
    /// # Arguments
    /// * `task` - The task label
    /// * `tags` - Caller-supplied preference tags, possibly empty
    pub fn route_task(&self, task: TaskLabel, tags: &[String]) -> Option<Routed> {
        let first_pick = self.selector.select(task, tags)?.to_string();

        let mut model_id = first_pick.clone();
        let mut rotated = false;
        if self.usage.is_limited(&model_id) {
            // Best-effort rotation: keep the limited model unless a second
            // selection pass yields a different candidate.
            if let Some(candidate) = self.selector.select(task, tags) {
                if candidate != first_pick {
                    info!(
                        limited = %first_pick,
                        candidate = %candidate,
                        task = %task,
                        "Rotating away from rate-limited model"
                    );
                    model_id = candidate.to_string();
                    rotated = true;
                    self.telemetry.record("route.rotated", 1.0);
                }
            }
        }

        let calls_in_window = self.usage.increment(&model_id);
        self.telemetry.record("route.selected", 1.0);
        debug!(model_id = %model_id, task = %task, calls_in_window, "Routed task");

        Some(Routed { model_id, task, calls_in_window, rotated })
    }
}
