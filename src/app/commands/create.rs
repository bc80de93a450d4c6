//! Pathway creation from a generated outline.

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::outline::outline_to_modules;
use crate::domain::{AppError, LearnerId, NewPathway, OutlineRequest, Pathway};
use crate::ports::PathwayStore;

/// Generate an outline and persist it as a new pathway in one step.
///
/// Any outline failure surfaces as `OutlineUnavailable` and nothing is stored.
pub fn execute<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    request: &OutlineRequest,
) -> Result<Pathway, AppError> {
    let modules = ctx
        .services()
        .outlines
        .generate_outline(request)
        .and_then(outline_to_modules)
        .map_err(|err| {
            tracing::warn!(%learner, goal = %request.goal, error = %err, "outline generation failed");
            match err {
                AppError::OutlineUnavailable(_) => err,
                other => AppError::OutlineUnavailable(other.to_string()),
            }
        })?;

    let pathway = ctx.store().create_pathway(
        NewPathway {
            learner: learner.clone(),
            goal: request.pathway_goal(),
            location: request.location.clone(),
            trade: request.trade.clone(),
            modules,
        },
        Utc::now(),
    )?;

    tracing::info!(
        %learner,
        pathway = %pathway.id,
        modules = pathway.modules.len(),
        "pathway created"
    );
    Ok(pathway)
}
