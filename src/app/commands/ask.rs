//! Learner questions about a module.

use chrono::Utc;
use serde::Serialize;

use crate::app::AppContext;
use crate::app::commands::owned_pathway_of_module;
use crate::domain::reflection::check_length;
use crate::domain::{AppError, FALLBACK_ANSWER, LearnerId, ModuleId, Question, Rejection};
use crate::ports::{AnswerRequest, PathwayStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionOutcome {
    Answered(Question),
    Rejected(Rejection),
}

/// Answer a question about any module of the learner's pathway.
///
/// An answering outage stores an apology with `answered = false`.
pub fn execute<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module_id: ModuleId,
    question: &str,
) -> Result<QuestionOutcome, AppError> {
    let pathway = owned_pathway_of_module(ctx, learner, module_id)?;
    let module = pathway.module(module_id).ok_or(AppError::ModuleNotFound(module_id))?;

    if let Err(rejection) = check_length(question, ctx.config().progression.min_question_chars) {
        return Ok(QuestionOutcome::Rejected(rejection));
    }

    let question = question.trim().to_string();
    let request = AnswerRequest {
        question: question.clone(),
        module_title: module.title.clone(),
        module_content: module.content.clone(),
    };

    let (answer, answered) = match ctx.services().answers.answer_question(&request) {
        Ok(answer) if !answer.trim().is_empty() => (answer, true),
        Ok(_) => {
            tracing::warn!(module = %module_id, "answer service returned no text");
            (FALLBACK_ANSWER.to_string(), false)
        }
        Err(err) => {
            tracing::warn!(module = %module_id, error = %err, "answer service failed");
            (FALLBACK_ANSWER.to_string(), false)
        }
    };

    let recorded = ctx.store().record_question(Question {
        module: module_id,
        learner: learner.clone(),
        question,
        answer,
        answered,
        created_at: Utc::now(),
    })?;
    Ok(QuestionOutcome::Answered(recorded))
}

/// The learner's questions about `module_id`, newest first.
pub fn list<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module_id: ModuleId,
) -> Result<Vec<Question>, AppError> {
    owned_pathway_of_module(ctx, learner, module_id)?;
    ctx.store().questions_for(module_id, learner)
}
