//! Deterministic offline services used by `--mock`.

use crate::domain::outline::DEFAULT_TRADE;
use crate::domain::pathway::slugify;
use crate::domain::{
    AppError, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict, VideoCandidate,
    VideoQuery,
};
use crate::ports::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator, VideoSearch,
};

/// Stands in for every external service without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockServices;

impl OutlineGenerator for MockServices {
    fn generate_outline(&self, request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError> {
        let trade = request.trade.as_deref().unwrap_or(DEFAULT_TRADE);
        let goal = request.goal_description();

        Ok(vec![
            ModuleSpec {
                title: format!("Foundations of {}", goal),
                search_query: format!("{} basics for {}", goal, trade),
            },
            ModuleSpec {
                title: format!("Serving Customers in {}", request.location),
                search_query: format!("{} customer service {}", trade, request.location),
            },
            ModuleSpec {
                title: "Planning Your Next Steps".to_string(),
                search_query: format!("{} business plan", trade),
            },
        ])
    }
}

impl LessonGenerator for MockServices {
    fn generate_lesson(&self, request: &LessonRequest) -> Result<String, AppError> {
        let mut lesson = format!("## {}\n\n", request.module_title);
        match &request.previous_module_title {
            Some(previous) => lesson.push_str(&format!(
                "Building on '{}', this lesson walks through '{}' step by step.\n",
                previous, request.module_title
            )),
            None => lesson.push_str(&format!(
                "This lesson introduces '{}' with practical examples.\n",
                request.module_title
            )),
        }
        if !request.video_titles.is_empty() {
            lesson.push_str("\n### Watch\n\n");
            for title in &request.video_titles {
                lesson.push_str(&format!("- {}\n", title));
            }
        }
        Ok(lesson)
    }
}

impl VideoSearch for MockServices {
    fn search_videos(&self, query: &VideoQuery) -> Result<Vec<VideoCandidate>, AppError> {
        let stem = slugify(&query.query);
        Ok((1..)
            .map(|n| format!("{}-{}", stem, n))
            .filter(|id| !query.exclude.contains(id))
            .take(query.count)
            .map(|id| VideoCandidate {
                url: format!("https://videos.invalid/watch?v={}", id),
                title: format!("{} ({})", query.query, id),
                description: format!("Offline video for '{}'", query.query),
                id,
            })
            .collect())
    }
}

impl ReflectionValidator for MockServices {
    fn validate_reflection(
        &self,
        _request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError> {
        Ok(ReflectionVerdict::Accepted)
    }
}

impl QuestionAnswerer for MockServices {
    fn answer_question(&self, request: &AnswerRequest) -> Result<String, AppError> {
        Ok(format!(
            "In '{}', the short answer to \"{}\" is to start small and practise daily.",
            request.module_title,
            request.question.trim()
        ))
    }
}
