use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::progression::{self, Progress};
use crate::domain::{AppError, LearnerId, PathwayId};
use crate::ports::PathwayStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathwaySummary {
    pub id: PathwayId,
    pub goal: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub progress: Progress,
}

/// The learner's pathways, newest first.
pub fn execute<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
) -> Result<Vec<PathwaySummary>, AppError> {
    Ok(ctx
        .store()
        .pathways_for(learner)?
        .into_iter()
        .map(|pathway| PathwaySummary {
            id: pathway.id,
            progress: progression::progress(&pathway),
            goal: pathway.goal,
            location: pathway.location,
            created_at: pathway.created_at,
        })
        .collect())
}
