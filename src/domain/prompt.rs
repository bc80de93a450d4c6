//! Prompts sent to the text generation service.

use minijinja::context;

use super::AppError;
use super::lesson::LessonRequest;
use super::outline::OutlineRequest;
use super::render::{
    ANSWER_TEMPLATE, LESSON_TEMPLATE, OUTLINE_TEMPLATE, VALIDATION_TEMPLATE, render_template,
};
use super::text::truncate_chars;

/// Module content included when answering a question.
pub const ANSWER_CONTEXT_CHARS: usize = 1000;
/// Module content included when validating a reflection.
pub const VALIDATION_CONTEXT_CHARS: usize = 800;

pub fn lesson_prompt(request: &LessonRequest) -> Result<String, AppError> {
    render_template(
        "lesson prompt",
        LESSON_TEMPLATE,
        context! {
            module_title => &request.module_title,
            previous_module_title => &request.previous_module_title,
            video_titles => &request.video_titles,
        },
    )
}

pub fn outline_prompt(request: &OutlineRequest) -> Result<String, AppError> {
    render_template(
        "outline prompt",
        OUTLINE_TEMPLATE,
        context! {
            location => &request.location,
            trade => request.trade_or_default(),
            goal => request.goal_description(),
        },
    )
}

pub fn answer_prompt(
    question: &str,
    module_title: &str,
    module_content: &str,
) -> Result<String, AppError> {
    render_template(
        "answer prompt",
        ANSWER_TEMPLATE,
        context! {
            question => question,
            module_title => module_title,
            module_content => truncate_chars(module_content, ANSWER_CONTEXT_CHARS),
        },
    )
}

pub fn validation_prompt(
    answer: &str,
    module_title: &str,
    module_content: &str,
) -> Result<String, AppError> {
    render_template(
        "validation prompt",
        VALIDATION_TEMPLATE,
        context! {
            answer => answer,
            module_title => module_title,
            module_content => truncate_chars(module_content, VALIDATION_CONTEXT_CHARS),
        },
    )
}
