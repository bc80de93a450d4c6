use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::store_writes::{apply_completion, apply_content, build_pathway, newest_first};
use crate::domain::{
    AppError, Award, AwardGrant, GeneratedContent, GrantOutcome, LearnerId, ModuleId, NewPathway,
    Pathway, PathwayId, Question,
};
use crate::ports::{CompletionWrite, ContentWrite, PathwayStore};

/// In-memory pathway store; one mutex guards all state.
#[derive(Debug, Default)]
pub struct MemoryPathwayStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_pathway_id: u64,
    last_module_id: u64,
    pathways: BTreeMap<PathwayId, Pathway>,
    grants: Vec<AwardGrant>,
    questions: Vec<Question>,
}

impl MemoryState {
    fn pathway_mut_of_module(&mut self, module: ModuleId) -> Result<&mut Pathway, AppError> {
        self.pathways
            .values_mut()
            .find(|p| p.contains_module(module))
            .ok_or(AppError::ModuleNotFound(module))
    }
}

impl MemoryPathwayStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state.lock().map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

impl PathwayStore for MemoryPathwayStore {
    fn create_pathway(
        &self,
        pathway: NewPathway,
        created_at: DateTime<Utc>,
    ) -> Result<Pathway, AppError> {
        let mut state = self.lock()?;
        let id = PathwayId(state.last_pathway_id + 1);
        let first_module = state.last_module_id + 1;
        let module_count = pathway.modules.len() as u64;

        let pathway = build_pathway(id, first_module, pathway, created_at);
        state.last_pathway_id = id.0;
        state.last_module_id += module_count;
        state.pathways.insert(id, pathway.clone());
        Ok(pathway)
    }

    fn pathway(&self, id: PathwayId) -> Result<Option<Pathway>, AppError> {
        Ok(self.lock()?.pathways.get(&id).cloned())
    }

    fn pathways_for(&self, learner: &LearnerId) -> Result<Vec<Pathway>, AppError> {
        let state = self.lock()?;
        let mut owned: Vec<Pathway> =
            state.pathways.values().filter(|p| p.is_owned_by(learner)).cloned().collect();
        newest_first(&mut owned, |p| p.created_at);
        Ok(owned)
    }

    fn pathway_of_module(&self, module: ModuleId) -> Result<Option<Pathway>, AppError> {
        let state = self.lock()?;
        Ok(state.pathways.values().find(|p| p.contains_module(module)).cloned())
    }

    fn store_generated_content(
        &self,
        module: ModuleId,
        content: GeneratedContent,
    ) -> Result<ContentWrite, AppError> {
        let mut state = self.lock()?;
        apply_content(state.pathway_mut_of_module(module)?, module, content)
    }

    fn mark_completed(&self, module: ModuleId) -> Result<CompletionWrite, AppError> {
        let mut state = self.lock()?;
        apply_completion(state.pathway_mut_of_module(module)?, module)
    }

    fn grant_award(
        &self,
        learner: &LearnerId,
        award: &Award,
        awarded_at: DateTime<Utc>,
    ) -> Result<GrantOutcome, AppError> {
        let mut state = self.lock()?;
        if state.grants.iter().any(|g| &g.learner == learner && g.award == award.title) {
            return Ok(GrantOutcome::AlreadyHeld);
        }

        let grant =
            AwardGrant { learner: learner.clone(), award: award.title.clone(), awarded_at };
        state.grants.push(grant.clone());
        Ok(GrantOutcome::Granted { grant })
    }

    fn awards_for(&self, learner: &LearnerId) -> Result<Vec<AwardGrant>, AppError> {
        let state = self.lock()?;
        Ok(state.grants.iter().filter(|g| &g.learner == learner).cloned().collect())
    }

    fn record_question(&self, question: Question) -> Result<Question, AppError> {
        let mut state = self.lock()?;
        if !state.pathways.values().any(|p| p.contains_module(question.module)) {
            return Err(AppError::ModuleNotFound(question.module));
        }
        state.questions.push(question.clone());
        Ok(question)
    }

    fn questions_for(
        &self,
        module: ModuleId,
        learner: &LearnerId,
    ) -> Result<Vec<Question>, AppError> {
        let state = self.lock()?;
        let mut asked: Vec<Question> = state
            .questions
            .iter()
            .filter(|q| q.module == module && &q.learner == learner)
            .cloned()
            .collect();
        newest_first(&mut asked, |q| q.created_at);
        Ok(asked)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::domain::{NewModule, Video};

    fn learner(id: &str) -> LearnerId {
        LearnerId::new(id).unwrap()
    }

    fn new_pathway(learner_id: &str, modules: usize) -> NewPathway {
        NewPathway {
            learner: learner(learner_id),
            goal: "Tailoring: growing an existing business".to_string(),
            location: "Lagos".to_string(),
            trade: Some("Tailoring".to_string()),
            modules: (0..modules)
                .map(|i| NewModule {
                    title: format!("Module {}", i),
                    search_query: format!("query {}", i),
                })
                .collect(),
        }
    }

    fn content(text: &str, video_ids: &[&str]) -> GeneratedContent {
        GeneratedContent {
            content: text.to_string(),
            videos: video_ids
                .iter()
                .enumerate()
                .map(|(i, id)| Video {
                    external_id: id.to_string(),
                    title: format!("Video {}", id),
                    url: format!("https://www.youtube.com/watch?v={}", id),
                    description: String::new(),
                    order: i as u32,
                })
                .collect(),
        }
    }

    #[test]
    fn create_assigns_contiguous_orders_and_unique_ids() {
        let store = MemoryPathwayStore::new();
        let first = store.create_pathway(new_pathway("ada", 3), Utc::now()).unwrap();
        let second = store.create_pathway(new_pathway("ada", 2), Utc::now()).unwrap();

        let orders: Vec<_> = first.modules.iter().map(|m| m.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(first.slug, "tailoring-growing-an-existing-business");
        assert_ne!(first.id, second.id);
        let first_ids: Vec<_> = first.modules.iter().map(|m| m.id).collect();
        assert!(second.modules.iter().all(|m| !first_ids.contains(&m.id)));
    }

    #[test]
    fn content_is_written_once() {
        let store = MemoryPathwayStore::new();
        let pathway = store.create_pathway(new_pathway("ada", 2), Utc::now()).unwrap();
        let module = pathway.modules[0].id;

        let first = store.store_generated_content(module, content("first", &["v1"])).unwrap();
        let second = store.store_generated_content(module, content("second", &["v2"])).unwrap();

        match first {
            ContentWrite::Applied(m) => {
                assert_eq!(m.content, "first");
                assert_eq!(m.video_url.as_deref(), Some("https://www.youtube.com/watch?v=v1"));
            }
            other => panic!("expected Applied, got {:?}", other),
        }
        match second {
            ContentWrite::AlreadyGenerated(m) => assert_eq!(m.content, "first"),
            other => panic!("expected AlreadyGenerated, got {:?}", other),
        }
    }

    #[test]
    fn completion_requires_active_module() {
        let store = MemoryPathwayStore::new();
        let pathway = store.create_pathway(new_pathway("ada", 3), Utc::now()).unwrap();
        let ids: Vec<_> = pathway.modules.iter().map(|m| m.id).collect();

        assert_eq!(
            store.mark_completed(ids[1]).unwrap(),
            CompletionWrite::NotActive { active: Some(ids[0]) }
        );
        assert!(matches!(store.mark_completed(ids[0]).unwrap(), CompletionWrite::Applied(_)));
        assert_eq!(store.mark_completed(ids[0]).unwrap(), CompletionWrite::AlreadyCompleted);
    }

    #[test]
    fn unknown_module_is_not_found() {
        let store = MemoryPathwayStore::new();
        let err = store.mark_completed(ModuleId(42)).unwrap_err();
        assert!(matches!(err, AppError::ModuleNotFound(ModuleId(42))));
    }

    #[test]
    fn concurrent_grants_yield_one_grant() {
        let store = Arc::new(MemoryPathwayStore::new());
        let award = Award { title: "Academy Graduate".to_string(), description: String::new() };

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let award = award.clone();
                thread::spawn(move || store.grant_award(&learner("ada"), &award, Utc::now()))
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .filter(GrantOutcome::is_new)
            .count();

        assert_eq!(granted, 1);
        assert_eq!(store.awards_for(&learner("ada")).unwrap().len(), 1);
    }

    #[test]
    fn pathways_are_listed_per_learner() {
        let store = MemoryPathwayStore::new();
        store.create_pathway(new_pathway("ada", 1), Utc::now()).unwrap();
        store.create_pathway(new_pathway("bola", 1), Utc::now()).unwrap();

        let owned = store.pathways_for(&learner("ada")).unwrap();
        assert_eq!(owned.len(), 1);
        assert!(owned[0].is_owned_by(&learner("ada")));
    }
}
