use super::pathway::Video;

/// Inputs for generating one module's lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRequest {
    pub module_title: String,
    pub previous_module_title: Option<String>,
    pub video_titles: Vec<String>,
}

/// Everything written to a module by a single generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub content: String,
    pub videos: Vec<Video>,
}

impl GeneratedContent {
    pub fn primary_video_url(&self) -> Option<&str> {
        self.videos.first().map(|v| v.url.as_str())
    }
}
