//! Text generation ports: outlines, lessons, answers and reflection checks.

use crate::domain::{AppError, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict};

/// Produces the ordered module skeleton for a new pathway.
pub trait OutlineGenerator: Send + Sync {
    fn generate_outline(&self, request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError>;
}

/// Produces the lesson text for one module.
///
/// An empty lesson is an error, never a success.
pub trait LessonGenerator: Send + Sync {
    fn generate_lesson(&self, request: &LessonRequest) -> Result<String, AppError>;
}

/// Reflection submitted for semantic validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionRequest {
    pub answer: String,
    pub module_title: String,
    pub module_content: String,
}

/// Judges whether a reflection shows understanding of the module.
///
/// Returns `Accepted` or `Rejected`; service failures are reported as `Err` and
/// turned into `ServiceUnavailable` by the completion gate.
pub trait ReflectionValidator: Send + Sync {
    fn validate_reflection(
        &self,
        request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError>;
}

/// Question asked about a module's lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    pub question: String,
    pub module_title: String,
    pub module_content: String,
}

pub trait QuestionAnswerer: Send + Sync {
    fn answer_question(&self, request: &AnswerRequest) -> Result<String, AppError>;
}
