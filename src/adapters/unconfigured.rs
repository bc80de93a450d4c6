//! Generation services for when no credential is available.

use crate::domain::{
    AppError, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict,
};
use crate::ports::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator,
};

/// Fails every call with the name of the missing environment variable, so
/// read-only commands work without credentials and generation degrades.
#[derive(Debug, Clone)]
pub struct UnconfiguredGeneration {
    variable: String,
}

impl UnconfiguredGeneration {
    pub fn new(variable: impl Into<String>) -> Self {
        Self { variable: variable.into() }
    }

    fn missing(&self) -> AppError {
        AppError::EnvironmentVariableMissing(self.variable.clone())
    }
}

impl OutlineGenerator for UnconfiguredGeneration {
    fn generate_outline(&self, _request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError> {
        Err(self.missing())
    }
}

impl LessonGenerator for UnconfiguredGeneration {
    fn generate_lesson(&self, _request: &LessonRequest) -> Result<String, AppError> {
        Err(self.missing())
    }
}

impl QuestionAnswerer for UnconfiguredGeneration {
    fn answer_question(&self, _request: &AnswerRequest) -> Result<String, AppError> {
        Err(self.missing())
    }
}

impl ReflectionValidator for UnconfiguredGeneration {
    fn validate_reflection(
        &self,
        _request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError> {
        Err(self.missing())
    }
}
