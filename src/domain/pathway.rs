//! Pathway, module and video entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identities::{LearnerId, ModuleId, PathwayId};

/// An ordered learning plan owned by one learner.
///
/// The module list is fixed at creation; only per-module state changes afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: PathwayId,
    pub learner: LearnerId,
    pub goal: String,
    pub location: String,
    #[serde(default)]
    pub trade: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    /// Kept sorted by `order`.
    pub modules: Vec<Module>,
}

/// One unit of a pathway: the unit of generation and completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub order: u32,
    pub title: String,
    pub search_query: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_generated: bool,
    #[serde(default)]
    pub is_completed: bool,
    /// Primary display video, the first of `videos` once generated.
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// A supporting video attached to a module at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub external_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub order: u32,
}

impl Pathway {
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.module(id).is_some()
    }

    pub fn is_owned_by(&self, learner: &LearnerId) -> bool {
        &self.learner == learner
    }
}

/// Pathway as requested for creation, before the store assigns identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPathway {
    pub learner: LearnerId,
    pub goal: String,
    pub location: String,
    pub trade: Option<String>,
    pub modules: Vec<NewModule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewModule {
    pub title: String,
    pub search_query: String,
}

impl NewPathway {
    pub fn slug(&self) -> String {
        slugify(&self.goal)
    }
}

/// Lowercase ASCII slug: alphanumeric runs joined by single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
