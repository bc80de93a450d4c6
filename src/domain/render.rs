//! Template rendering for prompts and learner-facing documents.

use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use super::AppError;

pub(crate) const LESSON_TEMPLATE: &str = include_str!("templates/lesson.md");
pub(crate) const OUTLINE_TEMPLATE: &str = include_str!("templates/outline.md");
pub(crate) const ANSWER_TEMPLATE: &str = include_str!("templates/answer.md");
pub(crate) const VALIDATION_TEMPLATE: &str = include_str!("templates/validation.md");
pub(crate) const CERTIFICATE_TEMPLATE: &str = include_str!("templates/certificate.md");

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Render `source` with `context`; every referenced variable must be supplied.
pub(crate) fn render_template<C: Serialize>(
    template_name: &str,
    source: &str,
    context: C,
) -> Result<String, AppError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    env.render_str(source, context).map_err(|err| AppError::TemplateRender {
        template: template_name.to_string(),
        details: err.to_string(),
    })
}
