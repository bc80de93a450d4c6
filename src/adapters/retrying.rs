//! Retry wrapper for text generation operations.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::{
    AppError, GenerationConfig, LessonRequest, ModuleSpec, OutlineRequest, ReflectionVerdict,
};
use crate::ports::{
    AnswerRequest, LessonGenerator, OutlineGenerator, QuestionAnswerer, ReflectionRequest,
    ReflectionValidator,
};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        // attempt=1 -> base, attempt=2 -> base*2, attempt=3 -> base*4, capped.
        let exponent = failed_attempt.saturating_sub(1).min(6);
        let multiplier = 1_u64 << exponent;
        let backoff_ms = self.base_delay_ms.saturating_mul(multiplier).min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }

    /// Run `call` until it succeeds, fails permanently, or attempts run out.
    fn run<T>(
        &self,
        operation: &str,
        mut call: impl FnMut() -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut attempt = 1;
        loop {
            match call() {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !is_retryable_error(&error) || attempt >= self.max_attempts {
                        return Err(error);
                    }

                    let delay = self.delay_for_retry(attempt, &error);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %format_error_for_log(&error),
                        "generation call failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Applies a [`RetryPolicy`] to every generation port the inner client implements.
pub struct Retrying<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> Retrying<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T: OutlineGenerator> OutlineGenerator for Retrying<T> {
    fn generate_outline(&self, request: &OutlineRequest) -> Result<Vec<ModuleSpec>, AppError> {
        self.policy.run("generate_outline", || self.inner.generate_outline(request))
    }
}

impl<T: LessonGenerator> LessonGenerator for Retrying<T> {
    fn generate_lesson(&self, request: &LessonRequest) -> Result<String, AppError> {
        self.policy.run("generate_lesson", || self.inner.generate_lesson(request))
    }
}

impl<T: QuestionAnswerer> QuestionAnswerer for Retrying<T> {
    fn answer_question(&self, request: &AnswerRequest) -> Result<String, AppError> {
        self.policy.run("answer_question", || self.inner.answer_question(request))
    }
}

impl<T: ReflectionValidator> ReflectionValidator for Retrying<T> {
    fn validate_reflection(
        &self,
        request: &ReflectionRequest,
    ) -> Result<ReflectionVerdict, AppError> {
        self.policy.run("validate_reflection", || self.inner.validate_reflection(request))
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::Upstream { message, status, .. } => {
            if status.is_some_and(|code| code == 429 || code == 408 || code >= 500) {
                return true;
            }

            let lower = message.to_ascii_lowercase();
            lower.contains("timeout")
                || lower.contains("timed out")
                || lower.contains("connect")
                || lower.contains("connection")
                || lower.contains("temporary")
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::Upstream { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let digits: String = message[start..].chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4; // 25% jitter upper bound
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::Upstream { service, message, status } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("{}(status={}): {}", service, code, sanitized),
                None => format!("{}: {}", service, sanitized),
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let output: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    let mut compact = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct SequenceLessons {
        attempts: AtomicUsize,
        responses: Mutex<Vec<Result<String, AppError>>>,
    }

    impl SequenceLessons {
        fn new(responses: Vec<Result<String, AppError>>) -> Self {
            Self { attempts: AtomicUsize::new(0), responses: Mutex::new(responses) }
        }
    }

    impl LessonGenerator for SequenceLessons {
        fn generate_lesson(&self, _request: &LessonRequest) -> Result<String, AppError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.responses.lock().expect("responses lock poisoned");
            if guard.is_empty() {
                return Err(AppError::upstream("test", "unexpected extra call", Some(500)));
            }
            guard.remove(0)
        }
    }

    fn request() -> LessonRequest {
        LessonRequest {
            module_title: "Pricing".to_string(),
            previous_module_title: None,
            video_titles: vec![],
        }
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy { max_attempts, base_delay_ms: 1, max_delay_ms: 2 }
    }

    #[test]
    fn retries_transient_failures_and_succeeds() {
        let inner = SequenceLessons::new(vec![
            Err(AppError::upstream("Gemini", "server error", Some(500))),
            Err(AppError::upstream("Gemini", "rate limited", Some(429))),
            Ok("lesson".to_string()),
        ]);
        let client = Retrying::new(inner, policy(3));

        assert_eq!(client.generate_lesson(&request()).unwrap(), "lesson");
        assert_eq!(client.inner.attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn does_not_retry_on_client_error() {
        let inner =
            SequenceLessons::new(vec![Err(AppError::upstream("Gemini", "bad request", Some(400)))]);
        let client = Retrying::new(inner, policy(3));

        match client.generate_lesson(&request()).unwrap_err() {
            AppError::Upstream { status, .. } => assert_eq!(status, Some(400)),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(client.inner.attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn retries_timeouts_without_status() {
        let inner = SequenceLessons::new(vec![
            Err(AppError::upstream("Gemini", "HTTP request failed: operation timed out", None)),
            Ok("lesson".to_string()),
        ]);
        let client = Retrying::new(inner, policy(2));

        assert!(client.generate_lesson(&request()).is_ok());
    }

    #[test]
    fn stops_after_max_attempts() {
        let inner = SequenceLessons::new(vec![
            Err(AppError::upstream("Gemini", "server error", Some(500))),
            Err(AppError::upstream("Gemini", "server error", Some(500))),
            Ok("too late".to_string()),
        ]);
        let client = Retrying::new(inner, policy(2));

        assert!(client.generate_lesson(&request()).is_err());
        assert_eq!(client.inner.attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn honours_retry_after_hint() {
        let err = AppError::upstream("Gemini", "overloaded (retry_after_ms=1500)", Some(503));
        let policy = RetryPolicy { max_attempts: 2, base_delay_ms: 1, max_delay_ms: 30_000 };
        assert_eq!(policy.delay_for_retry(1, &err), Duration::from_millis(1500));
    }

    #[test]
    fn log_format_sanitizes_control_characters() {
        let err = AppError::upstream("Gemini", "bad\nerror\twith\rcontrols", Some(500));
        let formatted = format_error_for_log(&err);
        assert_eq!(formatted, "Gemini(status=500): bad error with controls");
    }

    #[test]
    fn log_format_truncates_long_messages() {
        let err = AppError::upstream("Gemini", "x".repeat(MAX_LOG_ERROR_CHARS + 10), None);
        assert!(format_error_for_log(&err).ends_with("[truncated]"));
    }
}
