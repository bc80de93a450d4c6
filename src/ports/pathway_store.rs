//! Persistence port for pathways and everything hanging off them.

use chrono::{DateTime, Utc};

use crate::domain::{
    AppError, Award, AwardGrant, GeneratedContent, GrantOutcome, LearnerId, Module, ModuleId,
    NewPathway, Pathway, PathwayId, Question,
};

/// Result of the conditional content write.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentWrite {
    /// This call persisted the content.
    Applied(Module),
    /// Another call got there first; carries the stored module.
    AlreadyGenerated(Module),
}

impl ContentWrite {
    pub fn into_module(self) -> Module {
        match self {
            ContentWrite::Applied(module) | ContentWrite::AlreadyGenerated(module) => module,
        }
    }
}

/// Result of the conditional completion write.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionWrite {
    /// The module was flipped to completed; carries the pathway after the write.
    Applied(Pathway),
    AlreadyCompleted,
    /// The module was not the active one when the write was attempted.
    NotActive { active: Option<ModuleId> },
}

/// Port for pathway persistence.
///
/// Implementations must make `create_pathway` all-or-nothing and must apply
/// `store_generated_content`, `mark_completed` and `grant_award` as
/// conditional writes under mutual exclusion.
pub trait PathwayStore: Send + Sync {
    /// Persist a pathway with all of its modules, assigning identifiers.
    fn create_pathway(&self, pathway: NewPathway, created_at: DateTime<Utc>)
    -> Result<Pathway, AppError>;

    fn pathway(&self, id: PathwayId) -> Result<Option<Pathway>, AppError>;

    /// Pathways owned by `learner`, newest first.
    fn pathways_for(&self, learner: &LearnerId) -> Result<Vec<Pathway>, AppError>;

    /// The pathway containing `module`.
    fn pathway_of_module(&self, module: ModuleId) -> Result<Option<Pathway>, AppError>;

    /// Store content and videos unless the module was already generated.
    fn store_generated_content(
        &self,
        module: ModuleId,
        content: GeneratedContent,
    ) -> Result<ContentWrite, AppError>;

    /// Mark `module` completed if it is still the active, incomplete module.
    fn mark_completed(&self, module: ModuleId) -> Result<CompletionWrite, AppError>;

    /// Insert a grant unless the learner already holds `award`.
    fn grant_award(
        &self,
        learner: &LearnerId,
        award: &Award,
        awarded_at: DateTime<Utc>,
    ) -> Result<GrantOutcome, AppError>;

    fn awards_for(&self, learner: &LearnerId) -> Result<Vec<AwardGrant>, AppError>;

    fn record_question(&self, question: Question) -> Result<Question, AppError>;

    /// Questions `learner` asked about `module`, newest first.
    fn questions_for(&self, module: ModuleId, learner: &LearnerId)
    -> Result<Vec<Question>, AppError>;
}
