//! Rule-based task classification.
//!
//! Maps free-text prompts to a coarse task label using ordered keyword
//! groups. Deliberately deterministic: no scoring, no embeddings, the first
//! matching group wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The coarse category assigned to a natural-language request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskLabel {
    /// General code writing; also the catch-all default.
    CodeGeneration,
    /// Fixing bugs and diagnosing errors.
    Debugging,
    /// Restructuring existing code.
    Refactoring,
    /// Writing or explaining documentation.
    Documentation,
    /// Looking things up on the web.
    InternetSearch,
    /// Reading, writing, or manipulating files.
    FileOperations,
}

impl TaskLabel {
    /// Returns the kebab-case wire name of the label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CodeGeneration => "code-generation",
            Self::Debugging => "debugging",
            Self::Refactoring => "refactoring",
            Self::Documentation => "documentation",
            Self::InternetSearch => "internet-search",
            Self::FileOperations => "file-operations",
        }
    }
}

impl fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code-generation" => Ok(Self::CodeGeneration),
            "debugging" => Ok(Self::Debugging),
            "refactoring" => Ok(Self::Refactoring),
            "documentation" => Ok(Self::Documentation),
            "internet-search" => Ok(Self::InternetSearch),
            "file-operations" => Ok(Self::FileOperations),
            other => Err(format!("Unknown task label: {other}")),
        }
    }
}

/// Keyword groups in priority order. Evaluation order is significant: the
/// first group with any keyword present in the prompt wins, even if a later
/// group would also match.
const KEYWORD_GROUPS: &[(TaskLabel, &[&str])] = &[
    (TaskLabel::Debugging, &["fix", "bug", "error", "debug"]),
    (TaskLabel::Refactoring, &["refactor", "clean up", "improve"]),
    (TaskLabel::Documentation, &["doc", "documentation", "explain"]),
    (TaskLabel::InternetSearch, &["search", "google", "web"]),
    (TaskLabel::FileOperations, &["file", "read", "write", "open"]),
];

/// Classifies a prompt into a task label.
///
/// Pure function of the lower-cased input; always returns a value, with
/// `TaskLabel::CodeGeneration` as the default when no keyword group matches.
#[must_use]
pub fn classify(prompt: &str) -> TaskLabel {
    let prompt = prompt.to_lowercase();
    for (label, keywords) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| prompt.contains(keyword)) {
            return *label;
        }
    }
    TaskLabel::CodeGeneration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_debugging_keywords() {
        assert_eq!(classify("fix the login bug"), TaskLabel::Debugging);
        assert_eq!(classify("why does this ERROR happen"), TaskLabel::Debugging);
        assert_eq!(classify("debug the parser"), TaskLabel::Debugging);
    }

    #[test]
    fn test_classify_refactoring_keywords() {
        assert_eq!(classify("refactor this module"), TaskLabel::Refactoring);
        assert_eq!(classify("please clean up the helpers"), TaskLabel::Refactoring);
    }

    #[test]
    fn test_classify_documentation_keywords() {
        assert_eq!(classify("add docs for the api"), TaskLabel::Documentation);
        assert_eq!(classify("explain this function"), TaskLabel::Documentation);
    }

    #[test]
    fn test_classify_search_keywords() {
        assert_eq!(classify("search for rust tutorials"), TaskLabel::InternetSearch);
        assert_eq!(classify("look on the web"), TaskLabel::InternetSearch);
    }

    #[test]
    fn test_classify_file_operation_keywords() {
        assert_eq!(classify("open the config"), TaskLabel::FileOperations);
        assert_eq!(classify("write it to notes.txt"), TaskLabel::FileOperations);
    }

    #[test]
    fn test_classify_default_is_code_generation() {
        assert_eq!(classify("implement a linked list"), TaskLabel::CodeGeneration);
        assert_eq!(classify(""), TaskLabel::CodeGeneration);
    }

    #[test]
    fn test_classify_priority_order_debugging_beats_refactoring() {
        // Contains both a debugging and a refactoring keyword; the
        // higher-priority group must win.
        assert_eq!(classify("fix then refactor the module"), TaskLabel::Debugging);
    }

    #[test]
    fn test_classify_priority_order_refactoring_beats_file_operations() {
        assert_eq!(classify("improve the file layout"), TaskLabel::Refactoring);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("FIX THE BUILD"), TaskLabel::Debugging);
    }

    #[test]
    fn test_task_label_round_trips_through_str() {
        for label in [
            TaskLabel::CodeGeneration,
            TaskLabel::Debugging,
            TaskLabel::Refactoring,
            TaskLabel::Documentation,
            TaskLabel::InternetSearch,
            TaskLabel::FileOperations,
        ] {
            assert_eq!(label.as_str().parse::<TaskLabel>().unwrap(), label);
        }
    }
}
