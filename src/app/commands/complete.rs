//! Completion gate.

use serde::Serialize;

use crate::app::AppContext;
use crate::app::commands::{awards, owned_pathway_of_module};
use crate::domain::progression;
use crate::domain::reflection::check_length;
use crate::domain::{
    AppError, GrantOutcome, LearnerId, Module, ModuleId, ReflectionVerdict, Rejection,
};
use crate::ports::{CompletionWrite, PathwayStore, ReflectionRequest};

/// What a successful completion changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub module: ModuleId,
    /// The module now unlocked, if any remain.
    pub next_active: Option<ModuleId>,
    pub pathway_complete: bool,
    /// Present only when this completion finished the pathway.
    pub award: Option<GrantOutcome>,
    /// The pathway is complete but the award could not be recorded; completing
    /// any of its modules again retries the grant.
    pub award_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Completed(CompletionReport),
    Rejected(Rejection),
}

/// Complete `module_id` with the learner's reflection.
///
/// Rejections for short or unconvincing reflections are `Ok(Rejected)` and
/// leave the module untouched. Targeting a module that is not the active one
/// is an error.
pub fn execute<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module_id: ModuleId,
    reflection: &str,
) -> Result<CompletionOutcome, AppError> {
    let pathway = owned_pathway_of_module(ctx, learner, module_id)?;
    let module = pathway.module(module_id).ok_or(AppError::ModuleNotFound(module_id))?;

    if module.is_completed {
        tracing::warn!(%learner, module = %module_id, "module already completed");
        if progression::is_complete(&pathway) {
            grant_completion_award(ctx, learner);
        }
        return Err(AppError::ModuleAlreadyCompleted(module_id));
    }
    if !progression::is_active(&pathway, module_id) {
        let active = progression::active_module(&pathway).map(|m| m.id);
        tracing::warn!(%learner, module = %module_id, ?active, "completion requested for inactive module");
        return Err(AppError::ModuleNotActive { module: module_id, active });
    }

    let settings = &ctx.config().progression;
    if let Err(rejection) = check_length(reflection, settings.min_reflection_chars) {
        tracing::info!(%learner, module = %module_id, "reflection too short");
        return Ok(CompletionOutcome::Rejected(rejection));
    }

    if settings.strict_validation {
        match assess_reflection(ctx, module, reflection) {
            ReflectionVerdict::Accepted => {}
            ReflectionVerdict::Rejected { reason } => {
                tracing::info!(%learner, module = %module_id, %reason, "reflection rejected");
                return Ok(CompletionOutcome::Rejected(Rejection::NotUnderstood { reason }));
            }
            ReflectionVerdict::ServiceUnavailable { detail } => {
                tracing::warn!(module = %module_id, %detail, "reflection validation unavailable, accepting");
            }
        }
    }

    let updated = match ctx.store().mark_completed(module_id)? {
        CompletionWrite::Applied(pathway) => pathway,
        CompletionWrite::AlreadyCompleted => {
            tracing::warn!(%learner, module = %module_id, "module completed concurrently");
            return Err(AppError::ModuleAlreadyCompleted(module_id));
        }
        CompletionWrite::NotActive { active } => {
            tracing::warn!(%learner, module = %module_id, ?active, "module no longer active");
            return Err(AppError::ModuleNotActive { module: module_id, active });
        }
    };

    let progress = progression::progress(&updated);
    tracing::info!(
        %learner,
        pathway = %updated.id,
        module = %module_id,
        completed = progress.completed,
        total = progress.total,
        "module completed"
    );

    let award = if progress.is_complete { grant_completion_award(ctx, learner) } else { None };

    Ok(CompletionOutcome::Completed(CompletionReport {
        module: module_id,
        next_active: progress.active,
        pathway_complete: progress.is_complete,
        award_pending: progress.is_complete && award.is_none(),
        award,
    }))
}

/// Fire the award trigger; a failed grant is logged and reported as `None`.
fn grant_completion_award<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
) -> Option<GrantOutcome> {
    awards::on_pathway_complete(ctx, learner)
        .inspect_err(|err| {
            tracing::error!(%learner, error = %err, "award grant failed, pathway stays complete");
        })
        .ok()
}

/// Ask the validation service about a reflection; failures become `ServiceUnavailable`.
pub fn assess_reflection<S: PathwayStore>(
    ctx: &AppContext<S>,
    module: &Module,
    reflection: &str,
) -> ReflectionVerdict {
    let request = ReflectionRequest {
        answer: reflection.trim().to_string(),
        module_title: module.title.clone(),
        module_content: module.content.clone(),
    };

    ctx.services()
        .validator
        .validate_reflection(&request)
        .unwrap_or_else(|err| ReflectionVerdict::ServiceUnavailable { detail: err.to_string() })
}
