use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identities::{LearnerId, ModuleId};

/// A learner's question about a module together with the generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub module: ModuleId,
    pub learner: LearnerId,
    pub question: String,
    pub answer: String,
    /// False when `answer` is a fallback because the answering service failed.
    pub answered: bool,
    pub created_at: DateTime<Utc>,
}

/// Answer stored when the answering service is unavailable.
pub const FALLBACK_ANSWER: &str =
    "I'm sorry, I couldn't generate an answer. Please try again later.";
