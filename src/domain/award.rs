use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identities::LearnerId;

/// Shared achievement definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub description: String,
}

/// A learner's grant of an award; at most one per (learner, award title).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardGrant {
    pub learner: LearnerId,
    pub award: String,
    pub awarded_at: DateTime<Utc>,
}

/// Result of an idempotent grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GrantOutcome {
    Granted { grant: AwardGrant },
    AlreadyHeld,
}

impl GrantOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, GrantOutcome::Granted { .. })
    }
}
