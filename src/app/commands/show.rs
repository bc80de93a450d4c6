//! Read-only views; nothing here triggers generation.

use serde::Serialize;

use crate::app::AppContext;
use crate::app::commands::{owned_pathway, owned_pathway_of_module};
use crate::domain::progression::{self, Progress};
use crate::domain::{AppError, LearnerId, Module, ModuleId, Pathway, PathwayId, Question};
use crate::ports::PathwayStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwayView {
    pub pathway: Pathway,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleView {
    pub pathway: PathwayId,
    pub module: Module,
    pub is_active: bool,
    pub questions: Vec<Question>,
}

pub fn pathway<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    pathway_id: PathwayId,
) -> Result<PathwayView, AppError> {
    let pathway = owned_pathway(ctx, learner, pathway_id)?;
    let progress = progression::progress(&pathway);
    Ok(PathwayView { pathway, progress })
}

pub fn module<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module_id: ModuleId,
) -> Result<ModuleView, AppError> {
    let pathway = owned_pathway_of_module(ctx, learner, module_id)?;
    let is_active = progression::is_active(&pathway, module_id);
    let module = pathway.module(module_id).cloned().ok_or(AppError::ModuleNotFound(module_id))?;
    let questions = ctx.store().questions_for(module_id, learner)?;

    Ok(ModuleView { pathway: pathway.id, module, is_active, questions })
}
