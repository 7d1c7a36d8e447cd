//! Extraction service - free text to structured event drafts

use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tempo_domain::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_EVENT_DURATION_MINUTES, DEFAULT_EVENT_TITLE, DEGRADED_CONFIDENCE,
};
use tempo_domain::utils::temporal;
use tempo_domain::{EventCategory, EventDraft, Result, TempoError};
use tracing::{debug, info, warn};

use super::fallback;
use super::ports::GenerationBackend;
use super::prompts;

lazy_static! {
    /// Markdown code-fence markers some models wrap their output in.
    static ref CODE_FENCE: Regex = Regex::new(r"(?i)```(?:json)?\s*").expect("static pattern");
}

/// How a draft was obtained from the generation backend.
///
/// The third outcome of the pipeline - both parse paths failing - is the
/// `Err` arm of [`ExtractionService::extract`], so a hard failure can never
/// be mistaken for a low-confidence success.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The backend output parsed strictly.
    Strict(EventDraft),
    /// Strict parsing failed; fields were recovered by pattern matching.
    /// Confidence is pinned low to communicate degraded trust.
    Degraded(EventDraft, String),
}

impl ExtractionOutcome {
    pub fn draft(&self) -> &EventDraft {
        match self {
            Self::Strict(draft) | Self::Degraded(draft, _) => draft,
        }
    }

    pub fn into_draft(self) -> EventDraft {
        match self {
            Self::Strict(draft) | Self::Degraded(draft, _) => draft,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(..))
    }
}

/// Raw backend output shape. Every field is optional and independently
/// defaulted; duration and confidence tolerate both numeric and string
/// encodings since the backend is free text underneath.
#[derive(Debug, Deserialize)]
struct RawExtraction {
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    duration: Option<serde_json::Value>,
    location: Option<String>,
    attendees: Option<Vec<String>>,
    category: Option<String>,
    description: Option<String>,
    confidence: Option<serde_json::Value>,
}

/// Extraction service for converting free text into structured event drafts
pub struct ExtractionService {
    backend: Arc<dyn GenerationBackend>,
}

impl ExtractionService {
    /// Create a new extraction service
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Extract a structured event draft from free text.
    ///
    /// # Errors
    /// - `BackendUnavailable` when the backend fails its health probe;
    ///   checked before any generation attempt.
    /// - `ExtractionFailed` when neither the strict nor the fallback path
    ///   can recover anything from the output.
    pub async fn extract(&self, input: &str) -> Result<ExtractionOutcome> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TempoError::InvalidInput("empty event description".into()));
        }

        if !self.backend.health_check().await {
            return Err(TempoError::BackendUnavailable(
                "generation backend failed its health check".into(),
            ));
        }

        let prompt = prompts::parse_event(input, Utc::now().date_naive());
        let raw = self.backend.generate(&prompt).await?;

        match parse_strict(&raw) {
            Ok(parsed) => {
                let draft = build_draft(parsed);
                info!(title = %draft.title, confidence = draft.confidence, "extraction parsed strictly");
                Ok(ExtractionOutcome::Strict(draft))
            }
            Err(reason) => {
                debug!(%reason, "strict parse failed, trying field fallback");
                let draft = recover_draft(&raw)?;
                warn!(title = %draft.title, "extraction degraded to fallback matching");
                Ok(ExtractionOutcome::Degraded(draft, reason))
            }
        }
    }
}

/// Strict structural parse of the backend output.
///
/// Strips code-fence markup, slices the outermost `{...}` span, then
/// requires valid JSON for the whole span.
fn parse_strict(raw: &str) -> std::result::Result<RawExtraction, String> {
    let cleaned = CODE_FENCE.replace_all(raw.trim(), "");
    let sliced = slice_object(&cleaned).ok_or_else(|| "no object literal in output".to_string())?;

    serde_json::from_str(sliced).map_err(|err| err.to_string())
}

/// The substring from the first `{` to the last `}`, if any.
fn slice_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Synthesize a draft from per-field pattern matching over the raw output.
///
/// Confidence is pinned at the degraded constant. Only an output with no
/// recoverable text at all fails here.
fn recover_draft(raw: &str) -> Result<EventDraft> {
    if raw.trim().is_empty() {
        return Err(TempoError::ExtractionFailed(
            "generation backend returned an empty response".into(),
        ));
    }

    let parsed = RawExtraction {
        title: fallback::extract_field(raw, "title"),
        date: fallback::extract_field(raw, "date"),
        time: fallback::extract_field(raw, "time"),
        duration: fallback::extract_field(raw, "duration").map(serde_json::Value::String),
        location: None,
        attendees: None,
        category: fallback::extract_field(raw, "category"),
        description: None,
        confidence: None,
    };

    let mut draft = build_draft(parsed);
    draft.confidence = DEGRADED_CONFIDENCE;
    Ok(draft)
}

/// Apply field defaults and derive the start/end instants.
///
/// The temporal resolver runs exactly once per extraction, here.
fn build_draft(parsed: RawExtraction) -> EventDraft {
    let start_time = temporal::resolve_date_time(parsed.date.as_deref(), parsed.time.as_deref());
    let duration = parsed
        .duration
        .as_ref()
        .and_then(coerce_minutes)
        .unwrap_or(DEFAULT_EVENT_DURATION_MINUTES);
    let end_time = temporal::calculate_end(start_time, duration);

    let title = parsed
        .title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_EVENT_TITLE.to_string());

    let category = parsed
        .category
        .map(|raw| EventCategory::parse_lenient(&raw))
        .unwrap_or_default();

    let confidence = parsed
        .confidence
        .as_ref()
        .and_then(coerce_confidence)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    EventDraft {
        title,
        description: parsed.description.filter(|text| !text.trim().is_empty()),
        start_time,
        end_time,
        location: parsed.location.filter(|text| !text.trim().is_empty()),
        attendees: EventDraft::dedup_attendees(parsed.attendees.unwrap_or_default()),
        category,
        confidence,
    }
}

/// Positive whole minutes from a JSON number or numeric string.
fn coerce_minutes(value: &serde_json::Value) -> Option<i64> {
    let minutes = match value {
        serde_json::Value::Number(number) => number.as_i64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }?;
    (minutes > 0).then_some(minutes)
}

fn coerce_confidence(value: &serde_json::Value) -> Option<f32> {
    match value {
        serde_json::Value::Number(number) => number.as_f64().map(|score| score as f32),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Backend stub returning a canned response.
    struct StubBackend {
        healthy: bool,
        response: String,
    }

    impl StubBackend {
        fn healthy(response: &str) -> Self {
            Self { healthy: true, response: response.to_string() }
        }
    }

    #[async_trait]
    impl GenerationBackend for StubBackend {
        async fn health_check(&self) -> bool {
            self.healthy
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    fn service(backend: StubBackend) -> ExtractionService {
        ExtractionService::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn strict_path_parses_clean_json() {
        let backend = StubBackend::healthy(
            r#"{"title": "Team Meeting", "date": "2030-06-10", "time": "14:00", "duration": 90,
                "attendees": ["John", "john", "Sarah"], "category": "work", "confidence": 0.95}"#,
        );

        let outcome = service(backend).extract("team meeting").await.expect("extracts");
        assert!(!outcome.is_degraded());

        let draft = outcome.draft();
        assert_eq!(draft.title, "Team Meeting");
        assert_eq!(draft.category, EventCategory::Work);
        assert_eq!(draft.confidence, 0.95);
        assert_eq!(draft.attendees, vec!["John", "Sarah"]);
        assert_eq!((draft.end_time - draft.start_time).num_minutes(), 90);
    }

    #[tokio::test]
    async fn strict_path_tolerates_code_fences_and_chatter() {
        let backend = StubBackend::healthy(
            "Here you go:\n```json\n{\"title\": \"Standup\", \"duration\": 15}\n```\nHope that helps!",
        );

        let outcome = service(backend).extract("standup").await.expect("extracts");
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.draft().title, "Standup");
    }

    #[tokio::test]
    async fn omitted_confidence_defaults_on_strict_path() {
        let backend = StubBackend::healthy(r#"{"title": "Review"}"#);
        let outcome = service(backend).extract("review").await.expect("extracts");
        assert_eq!(outcome.draft().confidence, DEFAULT_CONFIDENCE);
    }

    #[tokio::test]
    async fn unparseable_output_degrades_with_pinned_confidence() {
        let backend = StubBackend::healthy("I think you mean a meeting");

        let outcome = service(backend).extract("meeting?").await.expect("degrades, not fails");
        assert!(outcome.is_degraded());

        let draft = outcome.draft();
        assert_eq!(draft.confidence, DEGRADED_CONFIDENCE);
        assert_eq!(draft.category, EventCategory::Meeting);
        assert_eq!(draft.title, DEFAULT_EVENT_TITLE);
        assert_eq!((draft.end_time - draft.start_time).num_minutes(), 60);
    }

    #[tokio::test]
    async fn partially_recoverable_output_keeps_matched_fields() {
        let backend = StubBackend::healthy(
            r#"Sure - {"title": "Dentist", "time": "08:30", "duration": 45, "category": "personal"
               and that is everything I could find"#,
        );

        let outcome = service(backend).extract("dentist at 8.30").await.expect("degrades");
        let draft = outcome.draft();
        assert_eq!(draft.title, "Dentist");
        assert_eq!(draft.category, EventCategory::Personal);
        assert_eq!((draft.end_time - draft.start_time).num_minutes(), 45);
    }

    #[tokio::test]
    async fn empty_backend_output_is_extraction_failed() {
        let backend = StubBackend::healthy("   ");
        let err = service(backend).extract("anything").await.expect_err("hard failure");
        assert!(matches!(err, TempoError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn unhealthy_backend_short_circuits() {
        let backend = StubBackend { healthy: false, response: "unused".into() };
        let err = service(backend).extract("anything").await.expect_err("unavailable");
        assert!(matches!(err, TempoError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_the_backend() {
        let backend = StubBackend { healthy: false, response: String::new() };
        let err = service(backend).extract("  ").await.expect_err("invalid input");
        assert!(matches!(err, TempoError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn invalid_category_coerces_to_meeting() {
        let backend = StubBackend::healthy(r#"{"title": "Gala", "category": "banquet"}"#);
        let outcome = service(backend).extract("gala").await.expect("extracts");
        assert_eq!(outcome.draft().category, EventCategory::Meeting);
    }

    #[tokio::test]
    async fn string_duration_is_coerced_and_non_positive_rejected() {
        let backend = StubBackend::healthy(r#"{"title": "Run", "duration": "-30"}"#);
        let outcome = service(backend).extract("run").await.expect("extracts");
        assert_eq!((outcome.draft().end_time - outcome.draft().start_time).num_minutes(), 60);
    }
}
