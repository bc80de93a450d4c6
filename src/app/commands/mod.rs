pub mod ask;
pub mod awards;
pub mod certificate;
pub mod complete;
pub mod create;
pub mod list;
pub mod prepare;
pub mod show;

use crate::app::AppContext;
use crate::domain::{AppError, LearnerId, ModuleId, Pathway, PathwayId};
use crate::ports::PathwayStore;

/// Load a pathway the learner owns; someone else's pathway reads as missing.
pub(crate) fn owned_pathway<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    id: PathwayId,
) -> Result<Pathway, AppError> {
    match ctx.store().pathway(id)? {
        Some(pathway) if pathway.is_owned_by(learner) => Ok(pathway),
        _ => Err(AppError::PathwayNotFound(id)),
    }
}

/// Load the learner's pathway that contains `module`.
pub(crate) fn owned_pathway_of_module<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module: ModuleId,
) -> Result<Pathway, AppError> {
    match ctx.store().pathway_of_module(module)? {
        Some(pathway) if pathway.is_owned_by(learner) => Ok(pathway),
        _ => Err(AppError::ModuleNotFound(module)),
    }
}
