mod generation;
mod pathway_store;
mod video_search;

pub use generation::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator,
};
pub use pathway_store::{CompletionWrite, ContentWrite, PathwayStore};
pub use video_search::{DisabledVideoSearch, VideoSearch};
