use chrono::Utc;

use super::FakeServices;
use crate::adapters::MemoryPathwayStore;
use crate::app::AppContext;
use crate::domain::{
    EngineConfig, LearnerId, ModuleId, ModuleSpec, NewModule, NewPathway, Pathway,
};
use crate::ports::{CompletionWrite, PathwayStore};

/// In-memory engine wired to [`FakeServices`], acting as learner `ada`.
pub struct TestEngine {
    pub ctx: AppContext<MemoryPathwayStore>,
    pub fakes: FakeServices,
    pub learner: LearnerId,
    modules: usize,
}

impl TestEngine {
    /// Engine whose fake outline (and [`Self::create_pathway`]) has `modules` modules.
    pub fn with_modules(modules: usize) -> Self {
        Self::with_config(modules, EngineConfig::default())
    }

    pub fn with_config(modules: usize, config: EngineConfig) -> Self {
        let fakes = FakeServices::new();
        fakes.set_outline(
            (0..modules)
                .map(|i| ModuleSpec {
                    title: format!("Module {}", i),
                    search_query: format!("query {}", i),
                })
                .collect(),
        );
        let ctx = AppContext::new(MemoryPathwayStore::new(), fakes.services(), config);
        Self { ctx, fakes, learner: LearnerId::new("ada").unwrap(), modules }
    }

    /// Store a pathway directly, bypassing the outline service.
    pub fn create_pathway(&self) -> Pathway {
        let modules = (0..self.modules)
            .map(|i| NewModule { title: format!("Module {}", i), search_query: format!("query {}", i) })
            .collect();
        self.ctx
            .store()
            .create_pathway(
                NewPathway {
                    learner: self.learner.clone(),
                    goal: "managing business finances and pricing".to_string(),
                    location: "Lagos".to_string(),
                    trade: None,
                    modules,
                },
                Utc::now(),
            )
            .unwrap()
    }

    /// Mark a module completed without going through the completion gate.
    pub fn complete_directly(&self, module: ModuleId) {
        match self.ctx.store().mark_completed(module).unwrap() {
            CompletionWrite::Applied(_) => {}
            other => panic!("could not complete {}: {:?}", module, other),
        }
    }
}
