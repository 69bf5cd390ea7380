//! Advisory insights
//!
//! Every calculator surfaces a few human-readable nudges next to its
//! numbers. Insights are advisory only and never feed back into results.

use serde::{Deserialize, Serialize};

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Something is wrong with the current plan
    Warning,
    /// A concrete change worth considering
    Suggestion,
    /// Reinforcement that the plan is sound
    Positive,
}

/// A single advisory message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: InsightKind::Warning,
            message: message.into(),
        }
    }

    pub fn suggestion(message: impl Into<String>) -> Self {
        Self {
            kind: InsightKind::Suggestion,
            message: message.into(),
        }
    }

    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            kind: InsightKind::Positive,
            message: message.into(),
        }
    }
}
