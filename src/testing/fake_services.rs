use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::app::context::Services;
use crate::domain::{
    AppError, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict, VideoCandidate,
    VideoQuery,
};
use crate::ports::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator, VideoSearch,
};

/// Scriptable stand-in for every external service; records each request.
///
/// Video search returns the scripted candidates verbatim, excluded ids
/// included, so callers' own filtering is exercised.
#[derive(Clone, Default)]
pub struct FakeServices {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    outline: Mutex<Vec<ModuleSpec>>,
    videos: Mutex<Vec<VideoCandidate>>,
    verdict: Mutex<Option<ReflectionVerdict>>,
    outline_fails: AtomicBool,
    lessons_fail: AtomicBool,
    videos_fail: AtomicBool,
    validation_fails: AtomicBool,
    answers_fail: AtomicBool,
    outline_requests: Mutex<Vec<OutlineRequest>>,
    lesson_requests: Mutex<Vec<LessonRequest>>,
    video_queries: Mutex<Vec<VideoQuery>>,
    validation_requests: Mutex<Vec<ReflectionRequest>>,
    answer_requests: Mutex<Vec<AnswerRequest>>,
}

fn outage(service: &str) -> AppError {
    AppError::upstream(service, "operation timed out", None)
}

impl FakeServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&self) -> Services {
        Services {
            outlines: Box::new(self.clone()),
            lessons: Box::new(self.clone()),
            videos: Box::new(self.clone()),
            validator: Box::new(self.clone()),
            answers: Box::new(self.clone()),
        }
    }

    pub fn set_outline(&self, modules: Vec<ModuleSpec>) {
        *self.inner.outline.lock().unwrap() = modules;
    }

    pub fn set_videos(&self, candidates: Vec<VideoCandidate>) {
        *self.inner.videos.lock().unwrap() = candidates;
    }

    pub fn set_verdict(&self, verdict: ReflectionVerdict) {
        *self.inner.verdict.lock().unwrap() = Some(verdict);
    }

    pub fn fail_outline(&self) {
        self.inner.outline_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_lessons(&self) {
        self.inner.lessons_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_videos(&self) {
        self.inner.videos_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_validation(&self) {
        self.inner.validation_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_answers(&self) {
        self.inner.answers_fail.store(true, Ordering::SeqCst);
    }

    pub fn outline_requests(&self) -> Vec<OutlineRequest> {
        self.inner.outline_requests.lock().unwrap().clone()
    }

    pub fn lesson_requests(&self) -> Vec<LessonRequest> {
        self.inner.lesson_requests.lock().unwrap().clone()
    }

    pub fn video_queries(&self) -> Vec<VideoQuery> {
        self.inner.video_queries.lock().unwrap().clone()
    }

    pub fn validation_requests(&self) -> Vec<ReflectionRequest> {
        self.inner.validation_requests.lock().unwrap().clone()
    }

    pub fn answer_requests(&self) -> Vec<AnswerRequest> {
        self.inner.answer_requests.lock().unwrap().clone()
    }
}

impl OutlineGenerator for FakeServices {
    fn generate_outline(&self, request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError> {
        self.inner.outline_requests.lock().unwrap().push(request.clone());
        if self.inner.outline_fails.load(Ordering::SeqCst) {
            return Err(outage("outline"));
        }
        Ok(self.inner.outline.lock().unwrap().clone())
    }
}

impl LessonGenerator for FakeServices {
    fn generate_lesson(&self, request: &LessonRequest) -> Result<String, AppError> {
        self.inner.lesson_requests.lock().unwrap().push(request.clone());
        if self.inner.lessons_fail.load(Ordering::SeqCst) {
            return Err(outage("lesson"));
        }
        Ok(format!("Lesson for {}", request.module_title))
    }
}

impl VideoSearch for FakeServices {
    fn search_videos(&self, query: &VideoQuery) -> Result<Vec<VideoCandidate>, AppError> {
        self.inner.video_queries.lock().unwrap().push(query.clone());
        if self.inner.videos_fail.load(Ordering::SeqCst) {
            return Err(outage("videos"));
        }
        Ok(self.inner.videos.lock().unwrap().clone())
    }
}

impl ReflectionValidator for FakeServices {
    fn validate_reflection(
        &self,
        request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError> {
        self.inner.validation_requests.lock().unwrap().push(request.clone());
        if self.inner.validation_fails.load(Ordering::SeqCst) {
            return Err(outage("validation"));
        }
        Ok(self.inner.verdict.lock().unwrap().clone().unwrap_or(ReflectionVerdict::Accepted))
    }
}

impl QuestionAnswerer for FakeServices {
    fn answer_question(&self, request: &AnswerRequest) -> Result<String, AppError> {
        self.inner.answer_requests.lock().unwrap().push(request.clone());
        if self.inner.answers_fail.load(Ordering::SeqCst) {
            return Err(outage("answers"));
        }
        Ok(format!("Answer to: {}", request.question))
    }
}
