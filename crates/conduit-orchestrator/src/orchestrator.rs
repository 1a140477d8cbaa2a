//! Step-sequenced tool orchestration.
//!
//! Runs an ordered list of tool-invocation steps against the tool registry,
//! retrying each step a bounded number of times. Failures never abort the
//! remaining steps: the output always carries one entry per input step, and
//! partial completion is preferred over all-or-nothing failure.

use crate::registry::ToolRegistry;
use conduit_abstraction::{StepResult, ToolKwargs};
use conduit_router::TaskLabel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum invocation attempts per step. Attempts run back to back with no
/// backoff delay.
pub const MAX_STEP_ATTEMPTS: u32 = 3;

/// One tool invocation unit within an orchestration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Name of the tool to invoke.
    pub tool: String,
    /// Positional arguments, in order.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Keyword arguments.
    #[serde(default)]
    pub kwargs: ToolKwargs,
}

impl Step {
    /// Creates a step with no arguments.
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into(), args: Vec::new(), kwargs: ToolKwargs::new() }
    }

    /// Parses a JSON array of steps, as carried by a plan file.
    ///
    /// # Errors
    /// Returns the underlying `serde_json` error if the plan is malformed.
    pub fn parse_plan(raw: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Terminal state of one orchestration step, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepStatus {
    Succeeded,
    FailedAfterRetries,
    ToolNotFound,
}

/// Executes step lists against a fixed tool registry.
///
/// Holds no cross-request state; every orchestration call is independent
/// and its steps run strictly in input order.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    tools: Arc<ToolRegistry>,
}

impl Orchestrator {
    /// Creates an orchestrator over a tool registry.
    #[must_use]
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    /// Returns the tool registry.
    #[must_use]
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Runs the steps in order and returns one result per step.
    ///
    /// A step naming an unknown tool fails immediately without consuming
    /// retry attempts. Any other step gets up to `MAX_STEP_ATTEMPTS`
    /// invocations; an invocation counts as successful only if the result
    /// passes validation. Either way the orchestration moves on to the
    /// next step.
    ///
    /// # Arguments
    /// * `task` - The task label this plan belongs to, for tracing only
    /// * `steps` - The steps to execute, in order
    pub async fn orchestrate(&self, task: TaskLabel, steps: &[Step]) -> Vec<StepResult> {
        debug!(task = %task, step_count = steps.len(), "Starting orchestration");

        let mut results = Vec::with_capacity(steps.len());
        for step in steps {
            let (result, status) = self.run_step(step).await;
            debug!(tool = %step.tool, status = ?status, "Step finished");
            results.push(result);
        }
        results
    }

    async fn run_step(&self, step: &Step) -> (StepResult, StepStatus) {
        let Some(tool) = self.tools.get(&step.tool) else {
            warn!(tool = %step.tool, "Step names an unregistered tool");
            return (
                StepResult::failure(format!("Tool {} not found", step.tool)),
                StepStatus::ToolNotFound,
            );
        };

        for attempt in 1..=MAX_STEP_ATTEMPTS {
            match tool.invoke(&step.args, &step.kwargs).await {
                Ok(value) if Self::validate(&value) => {
                    return (StepResult::Success(value), StepStatus::Succeeded);
                }
                Ok(_) => {
                    warn!(tool = %step.tool, attempt, "Step result failed validation");
                }
                Err(e) => {
                    warn!(tool = %step.tool, attempt, error = %e, "Step invocation failed");
                }
            }
        }

        (
            StepResult::failure(format!("Step {} failed after retries", step.tool)),
            StepStatus::FailedAfterRetries,
        )
    }

    /// Accepts or rejects a tool result.
    ///
    /// Placeholder extension point for semantic checks; currently every
    /// result is accepted.
    fn validate(_result: &Value) -> bool {
        true
    }
}
