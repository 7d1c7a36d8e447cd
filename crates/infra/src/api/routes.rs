//! HTTP routes.
//!
//! Thin adapters over the core services: request shapes mirror the
//! services' inputs, and every handler maps domain errors onto status codes
//! in one place. The cron trigger is the only authenticated route, guarded
//! by a shared-secret bearer credential.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tempo_core::{
    EventService, ExtractionService, NotificationRepository, PatternService, SweepService,
};
use tempo_domain::constants::NOTIFICATION_FEED_LIMIT;
use tempo_domain::TempoError;
use tracing::error;
use uuid::Uuid;

const DEFAULT_USER: &str = "default-user";

/// Shared state for all API routes.
pub struct ApiState {
    pub extraction: Arc<ExtractionService>,
    pub events: Arc<EventService>,
    pub patterns: Arc<PatternService>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub sweep: Arc<SweepService>,
    pub cron_secret: String,
}

/// Build the API router.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/ai/parse", post(parse_event))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", get(get_event).put(update_event).delete(delete_event))
        .route("/api/patterns", get(get_patterns).post(refresh_patterns))
        .route("/api/notifications", get(notification_feed).post(mark_read))
        .route("/api/cron/notifications", get(run_sweep).post(run_sweep))
        .with_state(state)
}

fn error_response(err: TempoError) -> Response {
    let status = match &err {
        TempoError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        TempoError::NotFound(_) => StatusCode::NOT_FOUND,
        TempoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        TempoError::Auth(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(error = %err, "request failed");
    }

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[derive(Deserialize)]
struct ParseRequest {
    input: String,
}

/// POST /api/ai/parse - free text to a structured draft.
///
/// A degraded extraction is still a success; the confidence score carries
/// the distinction. Extraction failures surface the cause - submitted text
/// is never silently dropped.
async fn parse_event(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ParseRequest>,
) -> Response {
    match state.extraction.extract(&request.input).await {
        Ok(outcome) => {
            let degraded = outcome.is_degraded();
            let draft = outcome.into_draft();
            let confidence = draft.confidence;
            Json(json!({
                "success": true,
                "event": draft,
                "confidence": confidence,
                "degraded": degraded,
                "originalInput": request.input,
            }))
            .into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(flatten)]
    draft: tempo_domain::EventDraft,
}

/// POST /api/events - persist a draft plus its notifications.
async fn create_event(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateEventRequest>,
) -> Response {
    let user_id = request.user_id.unwrap_or_else(|| DEFAULT_USER.to_string());

    match state.events.create(&user_id, request.draft).await {
        Ok(event) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "event": event,
                "notification": {
                    "message": "Event created successfully! You will receive a reminder 15 minutes before the event.",
                },
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsQuery {
    user_id: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

/// GET /api/events - a user's events, optionally bounded to a range.
async fn list_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListEventsQuery>,
) -> Response {
    let user_id = query.user_id.unwrap_or_else(|| DEFAULT_USER.to_string());
    let range = query.start_date.zip(query.end_date);

    match state.events.list(&user_id, range).await {
        Ok(events) => Json(json!({ "events": events })).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/events/{id}
async fn get_event(State(state): State<Arc<ApiState>>, Path(id): Path<Uuid>) -> Response {
    match state.events.get(id).await {
        Ok(event) => Json(json!({ "event": event })).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEventRequest {
    title: Option<String>,
    description: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    location: Option<String>,
    attendees: Option<Vec<String>>,
    category: Option<tempo_domain::EventCategory>,
}

/// PUT /api/events/{id} - partial update over the stored event.
async fn update_event(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Response {
    let mut event = match state.events.get(id).await {
        Ok(event) => event,
        Err(err) => return error_response(err),
    };

    if let Some(title) = request.title {
        event.title = title;
    }
    if let Some(description) = request.description {
        event.description = Some(description);
    }
    if let Some(start_time) = request.start_time {
        event.start_time = start_time;
    }
    if let Some(end_time) = request.end_time {
        event.end_time = end_time;
    }
    if let Some(location) = request.location {
        event.location = Some(location);
    }
    if let Some(attendees) = request.attendees {
        event.attendees = tempo_domain::EventDraft::dedup_attendees(attendees);
    }
    if let Some(category) = request.category {
        event.category = category;
    }
    event.end_time = event.end_time.max(event.start_time);

    match state.events.update(event).await {
        Ok(event) => Json(json!({ "event": event })).into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/events/{id}
async fn delete_event(State(state): State<Arc<ApiState>>, Path(id): Path<Uuid>) -> Response {
    match state.events.delete(id).await {
        Ok(()) => {
            Json(json!({ "success": true, "message": "Event deleted successfully" })).into_response()
        }
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: Option<String>,
    #[serde(default)]
    unread_only: bool,
}

/// GET /api/patterns - lazily computed behavioral profile.
async fn get_patterns(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UserQuery>,
) -> Response {
    let user_id = query.user_id.unwrap_or_else(|| DEFAULT_USER.to_string());

    match state.patterns.get_or_create(&user_id).await {
        Ok(pattern) => Json(json!({ "pattern": pattern })).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPatternsRequest {
    user_id: Option<String>,
}

/// POST /api/patterns - recompute over the larger recent window.
async fn refresh_patterns(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RefreshPatternsRequest>,
) -> Response {
    let user_id = request.user_id.unwrap_or_else(|| DEFAULT_USER.to_string());

    match state.patterns.refresh(&user_id).await {
        Ok(pattern) => Json(json!({ "success": true, "pattern": pattern })).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/notifications - a user's feed, newest first, capped.
async fn notification_feed(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UserQuery>,
) -> Response {
    let user_id = query.user_id.unwrap_or_else(|| DEFAULT_USER.to_string());

    match state
        .notifications
        .find_for_user(&user_id, query.unread_only, NOTIFICATION_FEED_LIMIT)
        .await
    {
        Ok(notifications) => Json(json!({ "notifications": notifications })).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkReadRequest {
    notification_ids: Vec<Uuid>,
}

/// POST /api/notifications - mark notifications read.
async fn mark_read(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<MarkReadRequest>,
) -> Response {
    match state.notifications.mark_read(&request.notification_ids).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(err) => error_response(err),
    }
}

/// Sweep trigger: authenticated by a shared-secret bearer credential.
async fn run_sweep(State(state): State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    let expected = format!("Bearer {}", state.cron_secret);
    let presented = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());

    if presented != Some(expected.as_str()) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response();
    }

    match state.sweep.run_sweep().await {
        Ok(processed) => Json(json!({ "success": true, "processed": processed })).into_response(),
        Err(err) => error_response(err),
    }
}
