//! Completion certificates for finished pathways.

use chrono::NaiveDate;

use crate::app::AppContext;
use crate::app::commands::owned_pathway;
use crate::domain::{AppError, Certificate, LearnerId, PathwayId, issue_certificate};
use crate::ports::PathwayStore;

pub fn execute<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    pathway_id: PathwayId,
    full_name: &str,
    completion_date: NaiveDate,
) -> Result<Certificate, AppError> {
    let pathway = owned_pathway(ctx, learner, pathway_id)?;
    let certificate = issue_certificate(&pathway, full_name, completion_date).inspect_err(|err| {
        tracing::warn!(%learner, pathway = %pathway_id, error = %err, "certificate refused");
    })?;

    tracing::info!(%learner, pathway = %pathway_id, "certificate issued");
    Ok(certificate)
}
