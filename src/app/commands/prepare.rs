//! Lazy content generation for the active module.

use crate::app::AppContext;
use crate::app::commands::{owned_pathway, owned_pathway_of_module};
use crate::domain::progression;
use crate::domain::video::select_videos;
use crate::domain::{
    AppError, GeneratedContent, LearnerId, LessonRequest, Module, ModuleId, Pathway, PathwayId,
    VideoQuery,
};
use crate::ports::{ContentWrite, PathwayStore};

/// Make sure `module` has content, generating it on first access.
///
/// Already generated modules come back unchanged without any external call.
/// Generation is only allowed for the pathway's active module.
pub fn ensure_content<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    module_id: ModuleId,
) -> Result<Module, AppError> {
    let pathway = owned_pathway_of_module(ctx, learner, module_id)?;
    let module = pathway.module(module_id).ok_or(AppError::ModuleNotFound(module_id))?;

    if module.content_generated {
        return Ok(module.clone());
    }

    if !progression::is_active(&pathway, module_id) {
        let active = progression::active_module(&pathway).map(|m| m.id);
        tracing::warn!(%learner, module = %module_id, ?active, "generation requested for inactive module");
        return Err(AppError::ModuleNotActive { module: module_id, active });
    }

    let generated = generate(ctx, &pathway, module);
    match ctx.store().store_generated_content(module_id, generated)? {
        ContentWrite::Applied(module) => {
            tracing::info!(
                pathway = %pathway.id,
                module = %module_id,
                videos = module.videos.len(),
                "module content generated"
            );
            Ok(module)
        }
        ContentWrite::AlreadyGenerated(module) => {
            tracing::warn!(module = %module_id, "content generated concurrently, keeping stored copy");
            Ok(module)
        }
    }
}

/// Generate content for the pathway's active module, if there is one.
pub fn prepare_active_module<S: PathwayStore>(
    ctx: &AppContext<S>,
    learner: &LearnerId,
    pathway_id: PathwayId,
) -> Result<Option<Module>, AppError> {
    let pathway = owned_pathway(ctx, learner, pathway_id)?;
    match progression::active_module(&pathway) {
        Some(active) => ensure_content(ctx, learner, active.id).map(Some),
        None => Ok(None),
    }
}

/// Fetch videos and lesson text; service failures degrade instead of failing.
fn generate<S: PathwayStore>(
    ctx: &AppContext<S>,
    pathway: &Pathway,
    module: &Module,
) -> GeneratedContent {
    let exclude = progression::used_video_ids(pathway);
    let count = ctx.config().video.videos_per_module;
    let query = VideoQuery { query: module.search_query.clone(), count, exclude };

    let candidates = ctx.services().videos.search_videos(&query).unwrap_or_else(|err| {
        tracing::warn!(module = %module.id, error = %err, "video search failed, continuing without videos");
        Vec::new()
    });
    let videos = select_videos(candidates, &query.exclude, count);

    let request = LessonRequest {
        module_title: module.title.clone(),
        previous_module_title: progression::previous_module(pathway, module)
            .map(|m| m.title.clone()),
        video_titles: videos.iter().map(|v| v.title.clone()).collect(),
    };

    let content = match ctx.services().lessons.generate_lesson(&request) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            tracing::warn!(module = %module.id, "lesson generation returned no text, using fallback");
            fallback_content(ctx, module)
        }
        Err(err) => {
            tracing::warn!(module = %module.id, error = %err, "lesson generation failed, using fallback");
            fallback_content(ctx, module)
        }
    };

    GeneratedContent { content, videos }
}

fn fallback_content<S: PathwayStore>(ctx: &AppContext<S>, module: &Module) -> String {
    if module.content.trim().is_empty() {
        ctx.config().progression.placeholder_content.clone()
    } else {
        module.content.clone()
    }
}
