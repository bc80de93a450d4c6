//! Video search port definition.

use crate::domain::{AppError, VideoCandidate, VideoQuery};

/// Port for looking up supporting videos.
pub trait VideoSearch: Send + Sync {
    /// Up to `query.count` ranked candidates, none of them in `query.exclude`.
    fn search_videos(&self, query: &VideoQuery) -> Result<Vec<VideoCandidate>, AppError>;
}

/// Search used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledVideoSearch;

impl VideoSearch for DisabledVideoSearch {
    fn search_videos(&self, query: &VideoQuery) -> Result<Vec<VideoCandidate>, AppError> {
        tracing::debug!(query = %query.query, "video search disabled, returning no videos");
        Ok(Vec::new())
    }
}
