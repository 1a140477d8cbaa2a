//! Tool orchestration for the Conduit gateway.
//!
//! Multi-step workflows hand the orchestrator an ordered step list; it runs
//! each step against the tool registry with bounded retries and returns one
//! structured result per step.

pub mod orchestrator;
pub mod registry;
pub mod tools;

pub use conduit_abstraction::{StepResult, Tool, ToolError, ToolKwargs};
pub use orchestrator::{MAX_STEP_ATTEMPTS, Orchestrator, Step};
pub use registry::ToolRegistry;
pub use tools::EchoTool;
