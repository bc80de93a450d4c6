//! Award trigger and award listing.

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::{AppError, AwardGrant, GrantOutcome, LearnerId};
use crate::ports::PathwayStore;

/// Grant the configured completion award; repeated calls report `AlreadyHeld`.
pub fn on_pathway_complete<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
) -> Result<GrantOutcome, AppError> {
    let award = ctx.config().award.award();
    let outcome = ctx.store().grant_award(learner, &award, Utc::now())?;

    match &outcome {
        GrantOutcome::Granted { .. } => {
            tracing::info!(%learner, award = %award.title, "award granted");
        }
        GrantOutcome::AlreadyHeld => {
            tracing::warn!(%learner, award = %award.title, "award already held, not granted again");
        }
    }
    Ok(outcome)
}

pub fn list<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
) -> Result<Vec<AwardGrant>, AppError> {
    ctx.store().awards_for(learner)
}
