//! Axum route handlers for the Sessions API.

use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::assessment::models::{Answers, FreeResult, PaidResult};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::session::store::{SessionSnapshot, SessionStore};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CvSummary {
    pub filename: String,
    pub characters: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// What a client may see of a session. The paid result is withheld until the
/// session is paid.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub revision: u64,
    pub cv: Option<CvSummary>,
    pub answers: Option<Answers>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub free_result: Option<FreeResult>,
    pub paid_result: Option<PaidResult>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl SessionView {
    pub fn new(store: &SessionStore, snapshot: &SessionSnapshot) -> Self {
        Self {
            session_id: store.id(),
            created_at: store.created_at(),
            revision: snapshot.revision,
            cv: snapshot.cv.as_ref().map(|cv| CvSummary {
                filename: cv.filename.clone(),
                characters: cv.text.chars().count(),
                uploaded_at: cv.uploaded_at,
            }),
            answers: snapshot.answers,
            is_paid: snapshot.is_paid,
            paid_at: snapshot.paid_at,
            free_result: snapshot.free_result().cloned(),
            paid_result: snapshot
                .paid_result()
                .filter(|_| snapshot.is_paid)
                .cloned(),
            generated_at: snapshot.results.as_ref().map(|r| r.generated_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchParams {
    /// Return once the revision is greater than this. Defaults to the current revision.
    pub after: Option<u64>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct WatchResponse {
    pub changed: bool,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let store = state.sessions.create().await?;
    let view = SessionView::new(&store, &store.snapshot());
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let store = state.sessions.require(id).await?;
    Ok(Json(SessionView::new(&store, &store.snapshot())))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// PUT /api/v1/sessions/:id/answers
pub async fn handle_set_answers(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(answers): AppJson<Answers>,
) -> Result<Json<SessionView>, AppError> {
    let store = state.sessions.require(id).await?;
    let snapshot = store.set_answers(answers);
    Ok(Json(SessionView::new(&store, &snapshot)))
}

/// POST /api/v1/sessions/:id/cv
///
/// Multipart upload; the `file` field carries the filename and the CV as UTF-8 text.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let store = state.sessions.require(id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("'file' field must have a filename".to_string()))?;

        let text = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read CV text: {e}")))?;

        if text.trim().is_empty() {
            warn!(session_id = %id, %filename, "Rejected empty CV upload");
            return Err(AppError::Validation("CV file is empty".to_string()));
        }

        let snapshot = store.set_cv_data(filename, text);
        return Ok(Json(SessionView::new(&store, &snapshot)));
    }

    Err(AppError::Validation(
        "Multipart body must contain a 'file' field".to_string(),
    ))
}

/// POST /api/v1/sessions/:id/purchase
pub async fn handle_purchase(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let store = state.sessions.require(id).await?;
    let snapshot = store.mark_as_paid();
    Ok(Json(SessionView::new(&store, &snapshot)))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let store = state.sessions.require(id).await?;
    let snapshot = store.reset();
    Ok(Json(SessionView::new(&store, &snapshot)))
}

/// GET /api/v1/sessions/:id/results/free
pub async fn handle_free_result(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<FreeResult>, AppError> {
    let store = state.sessions.require(id).await?;
    let snapshot = store.snapshot();
    snapshot
        .free_result()
        .cloned()
        .map(Json)
        .ok_or_else(|| not_ready(id))
}

/// GET /api/v1/sessions/:id/results/paid
pub async fn handle_paid_result(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PaidResult>, AppError> {
    let store = state.sessions.require(id).await?;
    let snapshot = store.snapshot();
    if !snapshot.is_paid {
        return Err(AppError::PaymentRequired(
            "The full action plan is available after purchase".to_string(),
        ));
    }
    snapshot
        .paid_result()
        .cloned()
        .map(Json)
        .ok_or_else(|| not_ready(id))
}

/// GET /api/v1/sessions/:id/watch?after=N&timeout_ms=T
///
/// Long-poll: answers as soon as the session revision passes `after`, or with
/// the unchanged session when the timeout expires.
pub async fn handle_watch(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(params): AppQuery<WatchParams>,
) -> Result<Json<WatchResponse>, AppError> {
    let store = state.sessions.require(id).await?;
    let mut rx = store.subscribe();

    let current = rx.borrow_and_update().revision;
    let after = params.after.unwrap_or(current);
    let max_ms = state.config.long_poll_max_ms;
    let timeout = Duration::from_millis(params.timeout_ms.unwrap_or(max_ms).min(max_ms));

    let wait = async {
        loop {
            let revision = rx.borrow_and_update().revision;
            if revision > after {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };
    let _ = tokio::time::timeout(timeout, wait).await;

    let snapshot = rx.borrow().clone();
    Ok(Json(WatchResponse {
        changed: snapshot.revision > after,
        session: SessionView::new(&store, &snapshot),
    }))
}

fn not_ready(id: Uuid) -> AppError {
    AppError::NotFound(format!("No answers submitted for session {id}"))
}
