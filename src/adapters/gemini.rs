//! Gemini `generateContent` client backing every text generation port.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::prompt::{answer_prompt, lesson_prompt, outline_prompt, validation_prompt};
use crate::domain::{
    AppError, GenerationConfig, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict,
};
use crate::ports::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator,
};

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub(crate) const SERVICE: &str = "Gemini";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini request failed";
const JSON_MIME_TYPE: &str = "application/json";

/// HTTP transport for the Gemini API.
///
/// One request per call; retries live in [`super::retrying::Retrying`].
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    api_url: Url,
    client: Client,
    lesson_timeout: Duration,
    outline_timeout: Duration,
    answer_timeout: Duration,
    validation_timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, config: &GenerationConfig) -> Result<Self, AppError> {
        let client = Client::builder().build().map_err(|e| {
            AppError::upstream(SERVICE, format!("Failed to create HTTP client: {}", e), None)
        })?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            client,
            lesson_timeout: Duration::from_secs(config.lesson_timeout_secs),
            outline_timeout: Duration::from_secs(config.outline_timeout_secs),
            answer_timeout: Duration::from_secs(config.answer_timeout_secs),
            validation_timeout: Duration::from_secs(config.validation_timeout_secs),
        })
    }

    /// Build from `GEMINI_API_KEY`.
    pub fn from_env(config: &GenerationConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(GEMINI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::EnvironmentVariableMissing(GEMINI_API_KEY.into()))?;

        Self::new(api_key, config)
    }

    /// Send one prompt and return the first candidate's text.
    fn generate(&self, prompt: String, timeout: Duration, json: bool) -> Result<String, AppError> {
        let request = ApiRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: json
                .then(|| GenerationSettings { response_mime_type: JSON_MIME_TYPE.to_string() }),
        };

        let response = self
            .client
            .post(self.api_url.clone())
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, JSON_MIME_TYPE)
            .timeout(timeout)
            .json(&request)
            .send()
            .map_err(|e| {
                AppError::upstream(SERVICE, format!("HTTP request failed: {}", e.without_url()), None)
            })?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
                AppError::upstream(
                    SERVICE,
                    format!("Failed to parse response: {}", e),
                    Some(status.as_u16()),
                )
            })?;

            return api_response.first_text().ok_or_else(|| {
                AppError::upstream(SERVICE, "Response contained no text", Some(status.as_u16()))
            });
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::upstream(SERVICE, message, Some(status.as_u16())))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationSettings>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl ApiResponse {
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text = content.parts.into_iter().next()?.text;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct OutlineResponse {
    modules: Vec<ModuleSpec>,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    is_valid: bool,
    #[serde(default)]
    reason: String,
}

/// Parse a JSON payload, tolerating a surrounding Markdown code fence.
fn parse_json_text<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T, AppError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(|e| {
        AppError::upstream(SERVICE, format!("Response was not the expected JSON: {}", e), None)
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl OutlineGenerator for GeminiClient {
    fn generate_outline(&self, request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError> {
        let text = self.generate(outline_prompt(request)?, self.outline_timeout, true)?;
        let outline: OutlineResponse = parse_json_text(&text)?;
        Ok(outline.modules)
    }
}

impl LessonGenerator for GeminiClient {
    fn generate_lesson(&self, request: &LessonRequest) -> Result<String, AppError> {
        self.generate(lesson_prompt(request)?, self.lesson_timeout, false)
    }
}

impl QuestionAnswerer for GeminiClient {
    fn answer_question(&self, request: &AnswerRequest) -> Result<String, AppError> {
        let prompt =
            answer_prompt(&request.question, &request.module_title, &request.module_content)?;
        self.generate(prompt, self.answer_timeout, false)
    }
}

impl ReflectionValidator for GeminiClient {
    fn validate_reflection(
        &self,
        request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError> {
        let prompt =
            validation_prompt(&request.answer, &request.module_title, &request.module_content)?;
        let text = self.generate(prompt, self.validation_timeout, true)?;
        let verdict: ValidationResponse = parse_json_text(&text)?;

        if verdict.is_valid {
            Ok(ReflectionVerdict::Accepted)
        } else {
            let reason = verdict.reason.trim();
            let reason = if reason.is_empty() {
                "The answer does not reflect the module content."
            } else {
                reason
            };
            Ok(ReflectionVerdict::Rejected { reason: reason.to_string() })
        }
    }
}
