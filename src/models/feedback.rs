//! Review feedback types produced by the reviewer.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal/non-terminal outcome of a review pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// No critical issues remain; the pipeline may publish.
    Approved,
    /// Critical issues exist; the generator gets another iteration.
    NeedsRevision,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::NeedsRevision => write!(f, "needs_revision"),
        }
    }
}

/// A blocking problem that must be fixed before approval.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Issue {
    /// What is wrong.
    pub description: String,
    /// The document (or section) the issue refers to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A non-blocking recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Suggestion {
    /// What could be better.
    pub description: String,
    /// The document (or section) the suggestion refers to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Structured result of reviewing a documentation set against a snapshot.
///
/// The coordinator uses `status` to decide loop continuation; the
/// generator receives the whole object on the next iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub status: ReviewStatus,
    pub critical_issues: Vec<Issue>,
    pub improvements: Vec<Suggestion>,
    pub metrics: IndexMap<String, serde_json::Value>,
}

impl ReviewFeedback {
    /// Status derived from the invariant: approved iff no critical issues.
    pub fn from_parts(
        critical_issues: Vec<Issue>,
        improvements: Vec<Suggestion>,
        metrics: IndexMap<String, serde_json::Value>,
    ) -> Self {
        let status = if critical_issues.is_empty() {
            ReviewStatus::Approved
        } else {
            ReviewStatus::NeedsRevision
        };
        Self {
            status,
            critical_issues,
            improvements,
            metrics,
        }
    }

    /// Returns `true` if the review approved the documentation.
    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// Plain-text rendering for the generator's revision prompt.
    pub fn to_prompt_section(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Review status: {}\n", self.status));

        if !self.critical_issues.is_empty() {
            out.push_str("\nCritical issues (every one must be addressed):\n");
            for issue in &self.critical_issues {
                match &issue.location {
                    Some(loc) => out.push_str(&format!("- [{loc}] {}\n", issue.description)),
                    None => out.push_str(&format!("- {}\n", issue.description)),
                }
            }
        }

        if !self.improvements.is_empty() {
            out.push_str("\nSuggested improvements:\n");
            for s in &self.improvements {
                match &s.location {
                    Some(loc) => out.push_str(&format!("- [{loc}] {}\n", s.description)),
                    None => out.push_str(&format!("- {}\n", s.description)),
                }
            }
        }

        out
    }
}
