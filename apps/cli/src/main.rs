//! Conduit CLI - command-line front door to the gateway core.
//!
//! Exercises the routing and orchestration layer directly: classify a
//! prompt, route it to a configured model, list the registered tools, or
//! run a JSON step plan.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conduit_orchestrator::{EchoTool, Orchestrator, Step, ToolRegistry};
use conduit_router::{GatewayConfig, Router, Telemetry, UsageTracker, classify};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Conduit - task-routing gateway for interchangeable inference providers
#[derive(Parser, Debug)]
#[command(
    name = "conduit",
    author,
    version,
    about = "Conduit - task-routing gateway core",
    long_about = "Conduit routes free-text tasks to configured inference models and runs\nmulti-step tool plans with bounded retries."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a prompt into a task label
    Classify {
        /// The prompt text
        prompt: String,
    },

    /// Route a prompt to a configured model
    Route {
        /// The prompt text
        prompt: String,

        /// Path to the gateway configuration file
        #[arg(short, long, default_value = "gateway.toml")]
        config: PathBuf,

        /// Preference tags, repeatable
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// List the registered tools
    Tools,

    /// Run a JSON step plan through the orchestrator
    Run {
        /// Path to the plan file (a JSON array of steps)
        #[arg(short, long)]
        plan: PathBuf,

        /// Task label to attribute the plan to
        #[arg(short, long, default_value = "code-generation")]
        task: String,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    let level = Level::from_str(level).with_context(|| format!("Invalid log level: {level}"))?;
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

fn builtin_tools() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(EchoTool::new()));
    Arc::new(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    match args.command {
        Command::Classify { prompt } => {
            println!("{}", classify(&prompt));
        }
        Command::Route { prompt, config, tag } => {
            let config = GatewayConfig::from_path(&config)
                .with_context(|| format!("Failed to load config from {}", config.display()))?;
            let router =
                Router::new(config, Arc::new(UsageTracker::new()), Arc::new(Telemetry::new()));
            match router.route(&prompt, &tag) {
                Some(routed) => {
                    println!("task: {}", routed.task);
                    println!("model: {}", routed.model_id);
                    if routed.rotated {
                        println!("rotated: yes");
                    }
                }
                None => {
                    eprintln!("No models configured");
                    std::process::exit(1);
                }
            }
        }
        Command::Tools => {
            for name in builtin_tools().list_tools() {
                println!("{name}");
            }
        }
        Command::Run { plan, task } => {
            let raw = std::fs::read_to_string(&plan)
                .with_context(|| format!("Failed to read plan from {}", plan.display()))?;
            let steps = Step::parse_plan(&raw).context("Failed to parse step plan")?;
            let task = task.parse().map_err(|e: String| anyhow::anyhow!(e))?;

            let orchestrator = Orchestrator::new(builtin_tools());
            let results = orchestrator.orchestrate(task, &steps).await;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
