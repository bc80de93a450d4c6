//! Conditional writes shared by the store implementations.
//!
//! Callers hold the store's lock for the pathway while these run.

use chrono::{DateTime, Utc};

use crate::domain::progression;
use crate::domain::{
    AppError, GeneratedContent, Module, ModuleId, NewPathway, Pathway, PathwayId,
};
use crate::ports::{CompletionWrite, ContentWrite};

/// Materialize a new pathway; modules get consecutive ids starting at `first_module`.
pub(crate) fn build_pathway(
    id: PathwayId,
    first_module: u64,
    new: NewPathway,
    created_at: DateTime<Utc>,
) -> Pathway {
    let slug = new.slug();
    let modules = new
        .modules
        .into_iter()
        .enumerate()
        .map(|(position, module)| Module {
            id: ModuleId(first_module + position as u64),
            order: position as u32,
            title: module.title,
            search_query: module.search_query,
            content: String::new(),
            content_generated: false,
            is_completed: false,
            video_url: None,
            videos: Vec::new(),
        })
        .collect();

    Pathway {
        id,
        learner: new.learner,
        goal: new.goal,
        location: new.location,
        trade: new.trade,
        slug,
        created_at,
        modules,
    }
}

pub(crate) fn apply_content(
    pathway: &mut Pathway,
    module: ModuleId,
    content: GeneratedContent,
) -> Result<ContentWrite, AppError> {
    let target = pathway
        .modules
        .iter_mut()
        .find(|m| m.id == module)
        .ok_or(AppError::ModuleNotFound(module))?;

    if target.content_generated {
        return Ok(ContentWrite::AlreadyGenerated(target.clone()));
    }

    target.video_url = content.primary_video_url().map(str::to_string);
    target.content = content.content;
    target.videos = content.videos;
    target.content_generated = true;
    Ok(ContentWrite::Applied(target.clone()))
}

pub(crate) fn apply_completion(
    pathway: &mut Pathway,
    module: ModuleId,
) -> Result<CompletionWrite, AppError> {
    let target = pathway.module(module).ok_or(AppError::ModuleNotFound(module))?;
    if target.is_completed {
        return Ok(CompletionWrite::AlreadyCompleted);
    }
    if !progression::is_active(pathway, module) {
        return Ok(CompletionWrite::NotActive {
            active: progression::active_module(pathway).map(|m| m.id),
        });
    }

    if let Some(target) = pathway.modules.iter_mut().find(|m| m.id == module) {
        target.is_completed = true;
    }
    Ok(CompletionWrite::Applied(pathway.clone()))
}

/// Sort an insertion-ordered list newest first; ties keep the later insert first.
pub(crate) fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    items.reverse();
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}
