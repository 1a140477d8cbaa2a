//! Integration tests for the routing pipeline: TOML configuration through
//! classification, selection, and usage accounting.

use conduit_router::{GatewayConfig, Router, TaskLabel, Telemetry, UsageTracker, classify};
use std::sync::Arc;

const CONFIG: &str = r#"
    [[models]]
    id = "big-coder"
    tasks = ["code-generation", "refactoring"]
    tags = ["large"]

    [[models]]
    id = "fast-fixer"
    tasks = ["debugging"]
    tags = ["fast"]
    max_calls_per_window = 2

    [[models]]
    id = "doc-writer"
    tasks = ["documentation"]
"#;

fn build_router() -> Router {
    let config = GatewayConfig::from_toml_str(CONFIG).unwrap();
    Router::new(config, Arc::new(UsageTracker::new()), Arc::new(Telemetry::new()))
}

#[test]
fn test_prompt_routes_to_task_model() {
    let router = build_router();

    let routed = router.route("fix the flaky integration test", &[]).unwrap();
    assert_eq!(routed.task, TaskLabel::Debugging);
    assert_eq!(routed.model_id, "fast-fixer");

    let routed = router.route("add documentation for the api", &[]).unwrap();
    assert_eq!(routed.model_id, "doc-writer");
}

#[test]
fn test_undeclared_task_falls_back_to_first_configured_model() {
    let router = build_router();

    // No configured model declares internet-search.
    let routed = router.route("search the web for rust news", &[]).unwrap();
    assert_eq!(routed.task, TaskLabel::InternetSearch);
    assert_eq!(routed.model_id, "big-coder");
}

#[test]
fn test_soft_limit_keeps_dispatching_sole_candidate() {
    let router = build_router();

    // fast-fixer has a window limit of 2 from the config.
    for expected in 1..=2 {
        let routed = router.route("fix this bug", &[]).unwrap();
        assert_eq!(routed.calls_in_window, expected);
        assert!(!routed.rotated);
    }
    assert!(router.usage().is_limited("fast-fixer"));

    // Over the limit the same model is still dispatched and counted.
    let routed = router.route("fix this bug", &[]).unwrap();
    assert_eq!(routed.model_id, "fast-fixer");
    assert_eq!(routed.calls_in_window, 3);
}

#[test]
fn test_tag_preference_steers_selection() {
    let config = GatewayConfig::from_toml_str(
        r#"
        [[models]]
        id = "untagged"
        tasks = ["code-generation"]

        [[models]]
        id = "tagged"
        tasks = ["code-generation"]
        tags = ["fast"]
        "#,
    )
    .unwrap();
    let router = Router::new(config, Arc::new(UsageTracker::new()), Arc::new(Telemetry::new()));

    let routed = router.route_task(TaskLabel::CodeGeneration, &["fast".to_string()]).unwrap();
    assert_eq!(routed.model_id, "tagged");

    let routed = router.route_task(TaskLabel::CodeGeneration, &[]).unwrap();
    assert_eq!(routed.model_id, "untagged");
}

#[test]
fn test_classify_matches_router_task_assignment() {
    let router = build_router();
    let prompt = "refactor the session module";

    let routed = router.route(prompt, &[]).unwrap();
    assert_eq!(routed.task, classify(prompt));
    assert_eq!(routed.model_id, "big-coder");
}
