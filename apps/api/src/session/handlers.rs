use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::analysis::insights::match_strength_label;
use crate::errors::AppError;
use crate::models::suggestion::Suggestion;
use crate::session::store::{SessionView, SharedSession};
use crate::state::AppState;
use crate::suggestions::collaborators::{copy_rewrite, Notification};
use crate::suggestions::lifecycle::{FilterCounts, LifecycleOutcome, SuggestionFilter};

// ────────────────────────────────────────────────────────────────────────────
// Request / response bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub view: SessionView,
}

/// Result of a lifecycle operation plus the recomputed session.
#[derive(Serialize)]
pub struct OperationResponse {
    pub result: LifecycleOutcome,
    pub view: SessionView,
}

#[derive(Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestionCard {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub high_priority: bool,
    pub match_strength_label: &'static str,
}

#[derive(Serialize)]
pub struct SuggestionListResponse {
    pub filter: &'static str,
    pub suggestions: Vec<SuggestionCard>,
    pub counts: FilterCounts,
}

#[derive(Deserialize, Default)]
pub struct ApplyRequest {
    /// Explicit text; wins over `variant_id`.
    pub text: Option<String>,
    pub variant_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CopyRequest {
    pub variant_id: Option<String>,
}

#[derive(Serialize)]
pub struct CopyResponse {
    pub copied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set when the suggestion is no longer active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<LifecycleOutcome>,
}

#[derive(Deserialize)]
pub struct QuickEditRequest {
    pub action_id: String,
}

#[derive(Deserialize)]
pub struct EditTextRequest {
    pub text: String,
}

async fn load_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let (session_id, session) = state.sessions.create().await;
    let view = session.lock().await.view(Instant::now());
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id, view }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = load_session(&state, id).await?;
    let view = session.lock().await.view(Instant::now());
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// GET /api/v1/sessions/:id/notifications
/// Drains pending notifications; each is returned once.
pub async fn handle_drain_notifications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let session = load_session(&state, id).await?;
    let pending = session.lock().await.outbox().drain();
    Ok(Json(pending))
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/suggestions?filter=
pub async fn handle_list_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SuggestionListResponse>, AppError> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<SuggestionFilter>().map_err(AppError::Validation)?,
        None => SuggestionFilter::All,
    };

    let session = load_session(&state, id).await?;
    let session = session.lock().await;
    let lifecycle = session.lifecycle();

    let suggestions = lifecycle
        .filtered(filter)
        .into_iter()
        .map(|s| SuggestionCard {
            high_priority: s.is_high_priority(),
            match_strength_label: match_strength_label(s.match_strength),
            suggestion: s.clone(),
        })
        .collect();

    Ok(Json(SuggestionListResponse {
        filter: filter.as_str(),
        suggestions,
        counts: lifecycle.filter_counts(),
    }))
}

/// POST /api/v1/sessions/:id/suggestions/:sid/dismiss
pub async fn handle_dismiss(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let result = session.dismiss(&suggestion_id);
    Ok(Json(OperationResponse {
        result,
        view: session.view(Instant::now()),
    }))
}

/// POST /api/v1/sessions/:id/suggestions/:sid/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    if req.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Validation("Rewrite text must not be empty".to_string()));
    }

    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;

    // Unknown suggestions fall through to the lifecycle, which ignores them
    let text = req
        .text
        .or_else(|| {
            session
                .lifecycle()
                .final_rewrite(&suggestion_id, req.variant_id.as_deref())
        })
        .unwrap_or_default();

    let now = Instant::now();
    let result = session.apply_rewrite(&text, &suggestion_id, now);
    Ok(Json(OperationResponse {
        result,
        view: session.view(now),
    }))
}

/// POST /api/v1/sessions/:id/suggestions/:sid/copy
/// Writes the final rewrite to the clipboard. Never changes session state.
/// A stale suggestion id is absorbed: `copied` is false and `result` says why.
pub async fn handle_copy(
    State(state): State<AppState>,
    Path((id, suggestion_id)): Path<(Uuid, String)>,
    Json(req): Json<CopyRequest>,
) -> Result<Json<CopyResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let session = session.lock().await;

    let text = match session
        .lifecycle()
        .copy_text(&suggestion_id, req.variant_id.as_deref())
    {
        Ok(text) => text,
        Err(result) => {
            return Ok(Json(CopyResponse {
                copied: false,
                text: None,
                result: Some(result),
            }))
        }
    };

    let copied = copy_rewrite(
        &suggestion_id,
        &text,
        state.clipboard.as_ref(),
        session.outbox(),
    )
    .await;

    Ok(Json(CopyResponse {
        copied,
        text: Some(text),
        result: None,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/bullets/:bid/quick-edit
pub async fn handle_quick_edit(
    State(state): State<AppState>,
    Path((id, bullet_id)): Path<(Uuid, String)>,
    Json(req): Json<QuickEditRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let now = Instant::now();
    let result = session.quick_edit(&bullet_id, &req.action_id, now);
    Ok(Json(OperationResponse {
        result,
        view: session.view(now),
    }))
}

/// POST /api/v1/sessions/:id/bullets/:bid/edit
pub async fn handle_begin_edit(
    State(state): State<AppState>,
    Path((id, bullet_id)): Path<(Uuid, String)>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let result = session.begin_edit(&bullet_id);
    Ok(Json(OperationResponse {
        result,
        view: session.view(Instant::now()),
    }))
}

/// PUT /api/v1/sessions/:id/bullets/:bid/edit
pub async fn handle_set_edit_text(
    State(state): State<AppState>,
    Path((id, bullet_id)): Path<(Uuid, String)>,
    Json(req): Json<EditTextRequest>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let result = session.set_edit_text(&bullet_id, &req.text);
    Ok(Json(OperationResponse {
        result,
        view: session.view(Instant::now()),
    }))
}

/// POST /api/v1/sessions/:id/bullets/:bid/edit/save
pub async fn handle_save_edit(
    State(state): State<AppState>,
    Path((id, bullet_id)): Path<(Uuid, String)>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let now = Instant::now();
    let result = session.save_edit(&bullet_id, now);
    Ok(Json(OperationResponse {
        result,
        view: session.view(now),
    }))
}

/// DELETE /api/v1/sessions/:id/bullets/:bid/edit
pub async fn handle_cancel_edit(
    State(state): State<AppState>,
    Path((id, bullet_id)): Path<(Uuid, String)>,
) -> Result<Json<OperationResponse>, AppError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let result = session.cancel_edit(&bullet_id);
    Ok(Json(OperationResponse {
        result,
        view: session.view(Instant::now()),
    }))
}
