//! Engine configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, Award};

/// Configuration loaded from `pathwise.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Text generation service configuration.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Video search service configuration.
    #[serde(default)]
    pub video: VideoConfig,
    /// Progression gate thresholds.
    #[serde(default)]
    pub progression: ProgressionConfig,
    /// Completion award definition.
    #[serde(default)]
    pub award: AwardConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.generation.validate()?;
        self.video.validate()?;
        self.progression.validate()?;
        self.award.validate()?;
        Ok(())
    }
}

/// Text generation (Gemini `generateContent`) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Endpoint URL; the API key is appended as the `key` query parameter.
    #[serde(default = "default_generation_url")]
    pub api_url: Url,
    #[serde(default = "default_lesson_timeout")]
    pub lesson_timeout_secs: u64,
    #[serde(default = "default_outline_timeout")]
    pub outline_timeout_secs: u64,
    #[serde(default = "default_answer_timeout")]
    pub answer_timeout_secs: u64,
    #[serde(default = "default_validation_timeout")]
    pub validation_timeout_secs: u64,
    /// Maximum attempts per call, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: default_generation_url(),
            lesson_timeout_secs: default_lesson_timeout(),
            outline_timeout_secs: default_outline_timeout(),
            answer_timeout_secs: default_answer_timeout(),
            validation_timeout_secs: default_validation_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("lesson_timeout_secs", self.lesson_timeout_secs),
            ("outline_timeout_secs", self.outline_timeout_secs),
            ("answer_timeout_secs", self.answer_timeout_secs),
            ("validation_timeout_secs", self.validation_timeout_secs),
        ] {
            if value == 0 {
                return Err(AppError::InvalidConfig(format!("{} must be greater than 0", name)));
            }
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_generation_url() -> Url {
    Url::parse(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent",
    )
    .expect("Default generation URL must be valid")
}

fn default_lesson_timeout() -> u64 {
    90
}

fn default_outline_timeout() -> u64 {
    60
}

fn default_answer_timeout() -> u64 {
    60
}

fn default_validation_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

/// Upper bound the search provider accepts for one page of results.
pub const MAX_VIDEOS_PER_MODULE: usize = 10;

/// Video search (YouTube Data API `search`) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoConfig {
    #[serde(default = "default_video_url")]
    pub api_url: Url,
    #[serde(default = "default_video_timeout")]
    pub timeout_secs: u64,
    /// Videos attached to each module at generation time.
    #[serde(default = "default_videos_per_module")]
    pub videos_per_module: usize,
    #[serde(default = "default_relevance_language")]
    pub relevance_language: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_url: default_video_url(),
            timeout_secs: default_video_timeout(),
            videos_per_module: default_videos_per_module(),
            relevance_language: default_relevance_language(),
        }
    }
}

impl VideoConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "video.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.videos_per_module == 0 || self.videos_per_module > MAX_VIDEOS_PER_MODULE {
            return Err(AppError::InvalidConfig(format!(
                "videos_per_module must be between 1 and {}",
                MAX_VIDEOS_PER_MODULE
            )));
        }
        Ok(())
    }
}

fn default_video_url() -> Url {
    Url::parse("https://www.googleapis.com/youtube/v3/search")
        .expect("Default video URL must be valid")
}

fn default_video_timeout() -> u64 {
    15
}

fn default_videos_per_module() -> usize {
    4
}

fn default_relevance_language() -> String {
    "en".to_string()
}

/// Thresholds and fallbacks for the progression gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressionConfig {
    /// Minimum trimmed reflection length to complete a module.
    #[serde(default = "default_min_reflection_chars")]
    pub min_reflection_chars: usize,
    /// Minimum trimmed question length.
    #[serde(default = "default_min_question_chars")]
    pub min_question_chars: usize,
    /// Ask the validation service whether a reflection shows understanding.
    #[serde(default)]
    pub strict_validation: bool,
    /// Lesson text used when generation fails and nothing was stored before.
    #[serde(default = "default_placeholder_content")]
    pub placeholder_content: String,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            min_reflection_chars: default_min_reflection_chars(),
            min_question_chars: default_min_question_chars(),
            strict_validation: false,
            placeholder_content: default_placeholder_content(),
        }
    }
}

impl ProgressionConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_reflection_chars == 0 {
            return Err(AppError::InvalidConfig(
                "min_reflection_chars must be greater than 0".to_string(),
            ));
        }
        if self.min_question_chars == 0 {
            return Err(AppError::InvalidConfig(
                "min_question_chars must be greater than 0".to_string(),
            ));
        }
        if self.placeholder_content.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "placeholder_content must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_min_reflection_chars() -> usize {
    50
}

fn default_min_question_chars() -> usize {
    10
}

fn default_placeholder_content() -> String {
    "Content could not be generated. Please refresh the page.".to_string()
}

/// Award granted when a learner completes a whole pathway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwardConfig {
    #[serde(default = "default_award_title")]
    pub title: String,
    #[serde(default = "default_award_description")]
    pub description: String,
}

impl Default for AwardConfig {
    fn default() -> Self {
        Self { title: default_award_title(), description: default_award_description() }
    }
}

impl AwardConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidConfig("award.title must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn award(&self) -> Award {
        Award { title: self.title.trim().to_string(), description: self.description.clone() }
    }
}

fn default_award_title() -> String {
    "Academy Graduate".to_string()
}

fn default_award_description() -> String {
    "Completed every module of a learning pathway.".to_string()
}
