//! Reflection checks applied before a module may be completed.

use serde::Serialize;

/// Result of asking the semantic validation service about a reflection.
///
/// `ServiceUnavailable` is accepted: a validation outage must not lock the
/// learner out of progressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ReflectionVerdict {
    Accepted,
    Rejected { reason: String },
    ServiceUnavailable { detail: String },
}

impl ReflectionVerdict {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ReflectionVerdict::Rejected { .. })
    }
}

/// Why a reflection was not enough to complete a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    TooShort { min_chars: usize, actual_chars: usize },
    NotUnderstood { reason: String },
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::TooShort { min_chars, actual_chars } => format!(
                "Your answer is too short ({} of {} characters). Please describe what you learned in more detail to complete the module.",
                actual_chars, min_chars
            ),
            Rejection::NotUnderstood { reason } => {
                format!("Your answer does not show what you learned yet: {}", reason)
            }
        }
    }
}

/// Length of learner text as counted by the gates: trimmed, in characters.
pub fn text_length(text: &str) -> usize {
    text.trim().chars().count()
}

/// Length gate shared by reflections and questions.
pub fn check_length(text: &str, min_chars: usize) -> Result<(), Rejection> {
    let actual_chars = text_length(text);
    if actual_chars < min_chars {
        return Err(Rejection::TooShort { min_chars, actual_chars });
    }
    Ok(())
}
