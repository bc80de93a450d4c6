//! Construction of the external service set.

use crate::adapters::gemini::GEMINI_API_KEY;
use crate::adapters::{
    GeminiClient, MockServices, RetryPolicy, Retrying, UnconfiguredGeneration, YouTubeSearch,
};
use crate::app::context::Services;
use crate::domain::{AppError, EngineConfig};
use crate::ports::{DisabledVideoSearch, VideoSearch};

impl Services {
    /// Offline services for `--mock` and tests.
    pub fn mock() -> Self {
        Self {
            outlines: Box::new(MockServices),
            lessons: Box::new(MockServices),
            videos: Box::new(MockServices),
            validator: Box::new(MockServices),
            answers: Box::new(MockServices),
        }
    }

    /// Real services configured from the environment.
    ///
    /// Missing credentials never fail construction: without `GEMINI_API_KEY`
    /// every generation call reports the missing variable, and without
    /// `YOUTUBE_API_KEY` video search is disabled.
    pub fn from_env(config: &EngineConfig) -> Result<Self, AppError> {
        let videos: Box<dyn VideoSearch> = match YouTubeSearch::from_env(&config.video)? {
            Some(search) => Box::new(search),
            None => {
                tracing::debug!("YOUTUBE_API_KEY not set, video search disabled");
                Box::new(DisabledVideoSearch)
            }
        };

        match GeminiClient::from_env(&config.generation) {
            Ok(client) => {
                let policy = RetryPolicy::from_config(&config.generation);
                Ok(Self {
                    outlines: Box::new(Retrying::new(client.clone(), policy)),
                    lessons: Box::new(Retrying::new(client.clone(), policy)),
                    videos,
                    validator: Box::new(Retrying::new(client.clone(), policy)),
                    answers: Box::new(Retrying::new(client, policy)),
                })
            }
            Err(AppError::EnvironmentVariableMissing(variable)) => {
                tracing::debug!(%variable, "text generation not configured");
                let missing = UnconfiguredGeneration::new(GEMINI_API_KEY);
                Ok(Self {
                    outlines: Box::new(missing.clone()),
                    lessons: Box::new(missing.clone()),
                    videos,
                    validator: Box::new(missing.clone()),
                    answers: Box::new(missing),
                })
            }
            Err(err) => Err(err),
        }
    }
}
