//! Unlock rules for a pathway.
//!
//! Everything here is a pure query over a pathway snapshot. The active module is
//! recomputed from module state on every call and never stored, since another
//! request may complete a module between two reads.

use std::collections::BTreeSet;

use serde::Serialize;

use super::identities::ModuleId;
use super::pathway::{Module, Pathway};

/// The minimum-order module that is not yet completed, or `None` once the
/// pathway is complete.
pub fn active_module(pathway: &Pathway) -> Option<&Module> {
    pathway.modules.iter().filter(|m| !m.is_completed).min_by_key(|m| m.order)
}

/// The module with the highest order strictly below `module`'s order.
pub fn previous_module<'a>(pathway: &'a Pathway, module: &Module) -> Option<&'a Module> {
    pathway.modules.iter().filter(|m| m.order < module.order).max_by_key(|m| m.order)
}

pub fn is_complete(pathway: &Pathway) -> bool {
    pathway.modules.iter().all(|m| m.is_completed)
}

pub fn is_active(pathway: &Pathway, module: ModuleId) -> bool {
    active_module(pathway).is_some_and(|m| m.id == module)
}

/// External identifiers of every video already attached anywhere in the pathway.
pub fn used_video_ids(pathway: &Pathway) -> BTreeSet<String> {
    pathway
        .modules
        .iter()
        .flat_map(|m| m.videos.iter())
        .map(|v| v.external_id.clone())
        .collect()
}

/// Aggregated view of pathway progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub active: Option<ModuleId>,
    pub is_complete: bool,
}

pub fn progress(pathway: &Pathway) -> Progress {
    let total = pathway.modules.len();
    let completed = pathway.modules.iter().filter(|m| m.is_completed).count();
    Progress {
        total,
        completed,
        remaining: total - completed,
        active: active_module(pathway).map(|m| m.id),
        is_complete: completed == total,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{LearnerId, PathwayId, Video};

    fn module(id: u64, order: u32, completed: bool) -> Module {
        Module {
            id: ModuleId(id),
            order,
            title: format!("Module {}", order),
            search_query: format!("query {}", order),
            content: String::new(),
            content_generated: false,
            is_completed: completed,
            video_url: None,
            videos: vec![],
        }
    }

    fn pathway(modules: Vec<Module>) -> Pathway {
        Pathway {
            id: PathwayId(1),
            learner: LearnerId::new("ada").unwrap(),
            goal: "Tailoring: growing an existing business".to_string(),
            location: "Lagos".to_string(),
            trade: Some("Tailoring".to_string()),
            slug: "tailoring-growing-an-existing-business".to_string(),
            created_at: Utc::now(),
            modules,
        }
    }

    #[test]
    fn first_incomplete_module_is_active() {
        let p = pathway(vec![module(10, 0, true), module(11, 1, false), module(12, 2, false)]);
        assert_eq!(active_module(&p).map(|m| m.id), Some(ModuleId(11)));
        assert!(is_active(&p, ModuleId(11)));
        assert!(!is_active(&p, ModuleId(12)));
    }

    #[test]
    fn active_ignores_vector_position() {
        let p = pathway(vec![module(12, 2, false), module(10, 0, false), module(11, 1, false)]);
        assert_eq!(active_module(&p).map(|m| m.id), Some(ModuleId(10)));
    }

    #[test]
    fn complete_pathway_has_no_active_module() {
        let p = pathway(vec![module(10, 0, true), module(11, 1, true)]);
        assert!(active_module(&p).is_none());
        assert!(is_complete(&p));
    }

    #[test]
    fn previous_module_is_nearest_lower_order() {
        let p = pathway(vec![module(10, 0, true), module(11, 1, true), module(12, 2, false)]);
        let current = p.module(ModuleId(12)).unwrap();
        assert_eq!(previous_module(&p, current).map(|m| m.id), Some(ModuleId(11)));

        let first = p.module(ModuleId(10)).unwrap();
        assert!(previous_module(&p, first).is_none());
    }

    #[test]
    fn used_video_ids_spans_all_modules() {
        let mut first = module(10, 0, true);
        first.videos.push(Video {
            external_id: "abc".to_string(),
            title: "A".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            description: String::new(),
            order: 0,
        });
        let mut second = module(11, 1, false);
        second.videos.push(Video {
            external_id: "def".to_string(),
            title: "D".to_string(),
            url: "https://www.youtube.com/watch?v=def".to_string(),
            description: String::new(),
            order: 0,
        });
        let p = pathway(vec![first, second]);

        let ids = used_video_ids(&p);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["abc", "def"]);
    }

    #[test]
    fn progress_counts_modules() {
        let p = pathway(vec![module(10, 0, true), module(11, 1, false), module(12, 2, false)]);
        let summary = progress(&p);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.remaining, 2);
        assert_eq!(summary.active, Some(ModuleId(11)));
        assert!(!summary.is_complete);
    }

    proptest! {
        #[test]
        fn active_is_minimum_incomplete(flags in proptest::collection::vec(any::<bool>(), 0..12)) {
            let modules: Vec<Module> = flags
                .iter()
                .enumerate()
                .rev()
                .map(|(i, done)| module(100 + i as u64, i as u32, *done))
                .collect();
            let p = pathway(modules);

            let expected = flags.iter().position(|done| !done).map(|i| ModuleId(100 + i as u64));
            prop_assert_eq!(active_module(&p).map(|m| m.id), expected);
            prop_assert_eq!(active_module(&p).is_none(), is_complete(&p));
        }
    }
}
