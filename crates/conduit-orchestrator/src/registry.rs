//! Tool registry.
//!
//! Holds the name-to-tool mapping used by the orchestrator. Tools are
//! registered explicitly during startup; once the registry is shared the
//! tool set is fixed. There is no directory scanning and no hot-reload.

use conduit_abstraction::{StepResult, Tool, ToolKwargs};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name-to-tool mapping, populated once at startup.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .finish_non_exhaustive()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name.
    ///
    /// # Arguments
    /// * `tool` - The tool to register
    ///
    /// # Returns
    /// Returns `true` if the tool was newly registered, `false` if it
    /// replaced one with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> bool {
        let name = tool.name().to_string();
        debug!(tool = %name, "Registering tool");

        let was_new = self.tools.insert(name.clone(), tool).is_none();
        if !was_new {
            warn!(tool = %name, "Tool replaced in registry");
        }
        was_new
    }

    /// Returns the registered tool names, sorted.
    #[must_use]
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Looks up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Runs a tool once by name.
    ///
    /// An unknown name yields the structured error
    /// `{"error": "Tool <name> not found"}` rather than a propagating
    /// failure; a tool's own error is surfaced the same way.
    ///
    /// # Arguments
    /// * `name` - The registered tool name
    /// * `args` - Positional arguments
    /// * `kwargs` - Keyword arguments
    pub async fn run_tool(&self, name: &str, args: &[Value], kwargs: &ToolKwargs) -> StepResult {
        let Some(tool) = self.get(name) else {
            debug!(tool = %name, "Tool not found");
            return StepResult::failure(format!("Tool {name} not found"));
        };

        match tool.invoke(args, kwargs).await {
            Ok(value) => StepResult::Success(value),
            Err(e) => StepResult::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::EchoTool;
    use serde_json::json;

    #[test]
    fn test_register_and_list_sorted() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(Arc::new(EchoTool::named("zeta"))));
        assert!(registry.register(Arc::new(EchoTool::named("alpha"))));

        assert_eq!(registry.list_tools(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(Arc::new(EchoTool::named("echo"))));
        assert!(!registry.register(Arc::new(EchoTool::named("echo"))));
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn test_run_tool_unknown_name_is_structured_error() {
        let registry = ToolRegistry::new();
        let result = registry.run_tool("missing", &[], &ToolKwargs::new()).await;
        assert_eq!(result.as_failure(), Some("Tool missing not found"));
    }

    #[tokio::test]
    async fn test_run_tool_returns_tool_value() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool::new()));

        let result = registry.run_tool("echo", &[json!("hello")], &ToolKwargs::new()).await;
        let value = result.as_success().unwrap();
        assert_eq!(value["args"], json!(["hello"]));
    }
}
