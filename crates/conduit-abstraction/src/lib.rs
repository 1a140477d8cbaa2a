//! Collaborator abstractions for the Conduit gateway core.
//!
//! This crate defines the traits and shared types through which the routing
//! and orchestration layer talks to its collaborators: provider discovery
//! sources and pluggable tools. The actual inference backends live outside
//! the core and only need to implement these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Keyword arguments passed to a tool invocation.
pub type ToolKwargs = serde_json::Map<String, Value>;

/// Represents an error reported by a provider discovery source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The listing request itself failed (e.g., network issues).
    #[error("Provider request error: {0}")]
    RequestError(String),

    /// The provider returned a response the source could not interpret.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The provider rejected the caller's credentials.
    #[error("Provider authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Other unexpected errors.
    #[error("Provider error: {0}")]
    Other(String),
}

/// Represents an error raised by a tool invocation.
///
/// Tool errors are never fatal to an orchestration; the orchestrator retries
/// the step and eventually surfaces the failure as a structured value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The arguments did not match what the tool expects.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    /// The tool ran but failed to produce a result.
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// Other unexpected errors.
    #[error("Tool error: {0}")]
    Other(String),
}

/// A raw model listing entry as reported by a provider, before the registry
/// normalizes it into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredModel {
    /// The provider-scoped model identifier.
    pub id: String,
}

impl DiscoveredModel {
    /// Creates a listing entry from any id-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A raw agent listing entry as reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredAgent {
    /// The provider-scoped agent identifier.
    pub id: String,
    /// Human-readable agent name.
    pub name: String,
    /// Description of what the agent does.
    pub description: String,
    /// Ordered capability tags, as reported.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A discovery source for one provider's models and agents.
///
/// Implementations typically wrap a network client for an external catalog
/// endpoint. The registry treats every source independently: a failing
/// source contributes nothing for that refresh and never aborts discovery
/// for the others.
#[async_trait]
pub trait ProviderDiscovery: Send + Sync {
    /// Returns the short provider tag (e.g., "io", "hf") stamped onto every
    /// descriptor originating from this source.
    fn provider(&self) -> &str;

    /// Lists the models this provider currently offers.
    ///
    /// # Errors
    /// Returns a `ProviderError` if the listing request fails as a whole.
    /// Individual bad entries should be returned as-is; the registry
    /// filters sentinel and malformed ids.
    async fn list_models(&self) -> Result<Vec<DiscoveredModel>, ProviderError>;

    /// Lists the agents this provider currently offers.
    ///
    /// Providers without an agent catalog keep the default empty listing.
    ///
    /// # Errors
    /// Returns a `ProviderError` if the listing request fails as a whole.
    async fn list_agents(&self) -> Result<Vec<DiscoveredAgent>, ProviderError> {
        Ok(Vec::new())
    }
}

/// A pluggable tool entry point.
///
/// Tools are registered explicitly at startup; the registry never scans for
/// them at runtime. An implementation must be callable with positional and
/// keyword arguments and return either a JSON-serializable success value or
/// a `ToolError`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name under which the tool is registered.
    fn name(&self) -> &str;

    /// Invokes the tool.
    ///
    /// # Arguments
    /// * `args` - Positional arguments, in order
    /// * `kwargs` - Keyword arguments
    ///
    /// # Errors
    /// Returns a `ToolError` if the invocation fails. The orchestrator
    /// treats this as retryable.
    async fn invoke(&self, args: &[Value], kwargs: &ToolKwargs) -> Result<Value, ToolError>;
}

/// The outcome of one orchestration step or one-shot tool run.
///
/// Serializes either to the tool's native JSON value or to the structured
/// error object `{"error": "..."}`. Failures are data, not exceptions: a
/// step outcome is always representable and never propagates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepResult {
    /// The step failed; `error` describes why.
    Failure {
        /// Human-readable failure description.
        error: String,
    },
    /// The step succeeded with the tool's native result value.
    Success(Value),
}

impl StepResult {
    /// Creates a failure outcome from any message-like value.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { error: message.into() }
    }

    /// Returns `true` if this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub fn as_success(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn as_failure(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_result_success_serializes_to_native_value() {
        let result = StepResult::Success(json!({"stdout": "ok"}));
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized, json!({"stdout": "ok"}));
    }

    #[test]
    fn test_step_result_failure_serializes_to_error_object() {
        let result = StepResult::failure("Tool shell not found");
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized, json!({"error": "Tool shell not found"}));
    }

    #[test]
    fn test_step_result_error_object_deserializes_as_failure() {
        let result: StepResult = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(result.as_failure(), Some("boom"));
        assert!(!result.is_success());
    }

    #[test]
    fn test_step_result_plain_value_deserializes_as_success() {
        let result: StepResult = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert!(result.is_success());
        assert_eq!(result.as_success(), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_discovered_agent_tags_default_to_empty() {
        let agent: DiscoveredAgent = serde_json::from_value(json!({
            "id": "triage",
            "name": "Triage",
            "description": "Routes incoming issues"
        }))
        .unwrap();
        assert!(agent.tags.is_empty());
    }
}
