pub mod award;
pub mod certificate;
pub mod configuration;
pub mod error;
pub mod identities;
pub mod lesson;
pub mod outline;
pub mod pathway;
pub mod progression;
pub mod prompt;
pub mod question;
pub mod reflection;
mod render;
mod text;
pub mod video;

pub use award::{Award, AwardGrant, GrantOutcome};
pub use certificate::{Certificate, issue_certificate};
pub use configuration::{
    AwardConfig, EngineConfig, GenerationConfig, MAX_VIDEOS_PER_MODULE, ProgressionConfig,
    VideoConfig,
};
pub use error::AppError;
pub use identities::{LearnerId, ModuleId, PathwayId};
pub use lesson::{GeneratedContent, LessonRequest};
pub use outline::{ModuleSpec, OutlineRequest};
pub use pathway::{Module, NewModule, NewPathway, Pathway, Video};
pub use progression::Progress;
pub use question::{FALLBACK_ANSWER, Question};
pub use reflection::{ReflectionVerdict, Rejection};
pub use video::{VideoCandidate, VideoQuery};
