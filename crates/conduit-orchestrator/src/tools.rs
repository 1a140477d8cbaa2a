//! Built-in tools.
//!
//! Real I/O tools (shell, file access, retrieval) live with the service
//! layer that embeds the gateway; the core ships only a harmless echo tool
//! that is useful for wiring checks and plan dry runs.

use async_trait::async_trait;
use conduit_abstraction::{Tool, ToolError, ToolKwargs};
use serde_json::{Value, json};

/// A tool that reflects its arguments back as its result.
#[derive(Debug, Clone)]
pub struct EchoTool {
    name: String,
}

impl EchoTool {
    /// Creates the echo tool under its default name, `echo`.
    #[must_use]
    pub fn new() -> Self {
        Self::named("echo")
    }

    /// Creates an echo tool registered under a custom name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for EchoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, args: &[Value], kwargs: &ToolKwargs) -> Result<Value, ToolError> {
        Ok(json!({
            "tool": self.name,
            "args": args,
            "kwargs": kwargs,
        }))
    }
}
