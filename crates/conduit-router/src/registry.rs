//! Unified model and agent registry.
//!
//! Aggregates descriptors from every configured provider discovery source
//! into one queryable snapshot. Discovery replaces the snapshot wholesale;
//! readers see either the previous snapshot or the new one, never a mix.

use conduit_abstraction::ProviderDiscovery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Task capabilities assumed for discovered models until providers report
/// richer metadata.
const DEFAULT_MODEL_TASKS: &[&str] = &["chat", "text-generation"];

/// Health of a discovered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Not probed yet.
    Unknown,
    /// Responding normally.
    Healthy,
    /// Responding but impaired.
    Degraded,
}

/// A selectable model known to the registry.
///
/// Immutable once discovered; a re-discovery replaces descriptors wholesale.
/// Identity is the `id` string — duplicate ids from different providers are
/// kept side by side, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable model identifier, also the usage-accounting handle.
    pub id: String,
    /// Short tag of the originating provider.
    pub provider: String,
    /// Task capabilities the model declares.
    pub tasks: BTreeSet<String>,
    /// Free-form capability tags.
    pub tags: BTreeSet<String>,
    /// Last known health.
    pub health: HealthStatus,
}

/// A selectable agent known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Stable agent identifier.
    pub id: String,
    /// Short tag of the originating provider.
    pub provider: String,
    /// Human-readable agent name.
    pub name: String,
    /// Description of what the agent does.
    pub description: String,
    /// Ordered capability tags, as reported by the provider.
    pub tags: Vec<String>,
}

/// One immutable discovery result set.
#[derive(Debug, Default)]
struct Snapshot {
    models: Vec<ModelDescriptor>,
    agents: Vec<AgentDescriptor>,
}

/// Registry of models and agents across all providers.
pub struct ModelRegistry {
    /// Discovery sources, fixed at construction.
    sources: Vec<Arc<dyn ProviderDiscovery>>,
    /// Current snapshot, replaced atomically on refresh.
    snapshot: RwLock<Arc<Snapshot>>,
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("source_count", &self.sources.len())
            .finish_non_exhaustive()
    }
}

impl ModelRegistry {
    /// Creates a registry over a fixed set of discovery sources.
    ///
    /// # Arguments
    /// * `sources` - One discovery source per provider
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn ProviderDiscovery>>) -> Self {
        Self { sources, snapshot: RwLock::new(Arc::new(Snapshot::default())) }
    }

    /// Refreshes models and agents from every source.
    ///
    /// The previous snapshot stays visible until the new one is complete,
    /// then is replaced in one write. A source that fails its listing call
    /// contributes zero descriptors for this refresh; the failure is logged
    /// and never aborts discovery for the other sources.
    pub async fn discover_all(&self) {
        let mut models = Vec::new();
        let mut agents = Vec::new();

        for source in &self.sources {
            let provider = source.provider().to_string();

            match source.list_models().await {
                Ok(listed) => {
                    let before = models.len();
                    models.extend(listed.into_iter().filter_map(|entry| {
                        if is_error_sentinel(&entry.id) {
                            debug!(provider = %provider, id = %entry.id, "Dropping sentinel model entry");
                            return None;
                        }
                        Some(ModelDescriptor {
                            id: entry.id,
                            provider: provider.clone(),
                            tasks: DEFAULT_MODEL_TASKS.iter().map(ToString::to_string).collect(),
                            tags: BTreeSet::new(),
                            health: HealthStatus::Unknown,
                        })
                    }));
                    debug!(provider = %provider, count = models.len() - before, "Discovered models");
                }
                Err(e) => {
                    warn!(provider = %provider, error = %e, "Model discovery failed for provider");
                }
            }

            match source.list_agents().await {
                Ok(listed) => {
                    agents.extend(listed.into_iter().filter_map(|entry| {
                        if entry.id.trim().is_empty() {
                            debug!(provider = %provider, "Dropping agent entry without id");
                            return None;
                        }
                        Some(AgentDescriptor {
                            id: entry.id,
                            provider: provider.clone(),
                            name: entry.name,
                            description: entry.description,
                            tags: entry.tags,
                        })
                    }));
                }
                Err(e) => {
                    warn!(provider = %provider, error = %e, "Agent discovery failed for provider");
                }
            }
        }

        let next = Arc::new(Snapshot { models, agents });
        *self.snapshot.write().await = next;
    }

    /// Returns models from the current snapshot, optionally filtered.
    ///
    /// # Arguments
    /// * `task` - Keep only models declaring this task capability
    /// * `provider` - Keep only models from this provider
    pub async fn get_models(
        &self,
        task: Option<&str>,
        provider: Option<&str>,
    ) -> Vec<ModelDescriptor> {
        let snapshot = Arc::clone(&*self.snapshot.read().await);
        snapshot
            .models
            .iter()
            .filter(|m| task.is_none_or(|t| m.tasks.contains(t)))
            .filter(|m| provider.is_none_or(|p| m.provider == p))
            .cloned()
            .collect()
    }

    /// Returns agents from the current snapshot, optionally filtered by
    /// provider.
    pub async fn get_agents(&self, provider: Option<&str>) -> Vec<AgentDescriptor> {
        let snapshot = Arc::clone(&*self.snapshot.read().await);
        snapshot
            .agents
            .iter()
            .filter(|a| provider.is_none_or(|p| a.provider == p))
            .cloned()
            .collect()
    }
}

/// Some providers report listing failures inline, as a bracketed error
/// string where a model id belongs. Those entries carry no usable id and
/// are dropped, as are blank ids.
fn is_error_sentinel(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || id.starts_with('[')
}
