//! Task-to-model selection over the static configuration.
//!
//! Selection is a pure function of the configured model list and the call
//! arguments. Order matters everywhere: ties are broken by earliest
//! declaration in the configuration, never randomly. Rate limits are not
//! consulted here; the rotation policy lives in the router.

use crate::classifier::TaskLabel;
use crate::config::ModelConfig;
use tracing::debug;

/// Picks a concrete model id for a task label.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    /// Configured models, in selection order.
    models: Vec<ModelConfig>,
}

impl ModelSelector {
    /// Creates a selector over a configured model list.
    ///
    /// # Arguments
    /// * `models` - Models in declaration order; this order is the
    ///   selection order
    #[must_use]
    pub fn new(models: Vec<ModelConfig>) -> Self {
        Self { models }
    }

    /// Returns the configured models in selection order.
    #[must_use]
    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    /// Selects a model id for a task.
    ///
    /// In order: the first model declaring the task whose tags intersect
    /// the caller's tags (empty caller tags match any model for the task);
    /// else the first model declaring the task; else the first configured
    /// model; else `None` when nothing is configured.
    ///
    /// # Arguments
    /// * `task` - The classified task label
    /// * `tags` - Caller-supplied preference tags, possibly empty
    #[must_use]
    pub fn select(&self, task: TaskLabel, tags: &[String]) -> Option<&str> {
        for model in &self.models {
            if model.tasks.contains(&task)
                && (tags.is_empty() || model.tags.iter().any(|tag| tags.contains(tag)))
            {
                debug!(model_id = %model.id, task = %task, "Selected model by task and tags");
                return Some(&model.id);
            }
        }

        for model in &self.models {
            if model.tasks.contains(&task) {
                debug!(model_id = %model.id, task = %task, "Selected model by task, ignoring tags");
                return Some(&model.id);
            }
        }

        let fallback = self.models.first().map(|model| model.id.as_str());
        if let Some(model_id) = fallback {
            debug!(model_id = %model_id, task = %task, "No model declares task, using first configured");
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str, tasks: &[TaskLabel], tags: &[&str]) -> ModelConfig {
        ModelConfig {
            id: id.to_string(),
            tasks: tasks.to_vec(),
            tags: tags.iter().map(ToString::to_string).collect(),
            max_calls_per_window: None,
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_prefers_tag_match_over_later_task_match() {
        let selector = ModelSelector::new(vec![
            model("plain", &[TaskLabel::Debugging], &[]),
            model("tagged", &[TaskLabel::Debugging], &["fast"]),
            model("late", &[TaskLabel::Debugging], &[]),
        ]);

        assert_eq!(selector.select(TaskLabel::Debugging, &tags(&["fast"])), Some("tagged"));
    }

    #[test]
    fn test_select_earliest_tag_match_wins() {
        let selector = ModelSelector::new(vec![
            model("a", &[TaskLabel::Debugging], &["fast"]),
            model("b", &[TaskLabel::Debugging], &["fast"]),
        ]);

        assert_eq!(selector.select(TaskLabel::Debugging, &tags(&["fast"])), Some("a"));
    }

    #[test]
    fn test_select_empty_tags_match_any_model_for_task() {
        let selector = ModelSelector::new(vec![
            model("other-task", &[TaskLabel::Documentation], &[]),
            model("match", &[TaskLabel::Debugging], &["fast"]),
        ]);

        assert_eq!(selector.select(TaskLabel::Debugging, &[]), Some("match"));
    }

    #[test]
    fn test_select_falls_back_to_task_match_ignoring_tags() {
        let selector = ModelSelector::new(vec![
            model("docs", &[TaskLabel::Documentation], &["slow"]),
            model("debug", &[TaskLabel::Debugging], &["slow"]),
        ]);

        // No model carries the requested tag, so the tag filter is dropped.
        assert_eq!(selector.select(TaskLabel::Debugging, &tags(&["fast"])), Some("debug"));
    }

    #[test]
    fn test_select_undeclared_task_returns_first_configured() {
        let selector = ModelSelector::new(vec![
            model("first", &[TaskLabel::Documentation], &[]),
            model("second", &[TaskLabel::Debugging], &[]),
        ]);

        assert_eq!(selector.select(TaskLabel::InternetSearch, &[]), Some("first"));
    }

    #[test]
    fn test_select_with_no_models_returns_none() {
        let selector = ModelSelector::new(Vec::new());
        assert_eq!(selector.select(TaskLabel::CodeGeneration, &[]), None);
    }

    #[test]
    fn test_select_is_deterministic() {
        let selector = ModelSelector::new(vec![
            model("a", &[TaskLabel::CodeGeneration], &[]),
            model("b", &[TaskLabel::CodeGeneration], &[]),
        ]);

        for _ in 0..10 {
            assert_eq!(selector.select(TaskLabel::CodeGeneration, &[]), Some("a"));
        }
    }
}
