use crate::domain::EngineConfig;
use crate::ports::{
    LessonGenerator, OutlineGenerator, PathwayStore, QuestionAnswerer, ReflectionValidator,
    VideoSearch,
};

/// External services the engine calls out to.
pub struct Services {
    pub outlines: Box<dyn OutlineGenerator>,
    pub lessons: Box<dyn LessonGenerator>,
    pub videos: Box<dyn VideoSearch>,
    pub validator: Box<dyn ReflectionValidator>,
    pub answers: Box<dyn QuestionAnswerer>,
}

/// Application context holding dependencies for command execution.
pub struct AppContext<S: PathwayStore> {
    store: S,
    services: Services,
    config: EngineConfig,
}

impl<S: PathwayStore> AppContext<S> {
    pub fn new(store: S, services: Services, config: EngineConfig) -> Self {
        Self { store, services, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
