//! Axum route handlers for the resume builder.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::preview::render_preview;
use crate::resume::sample::sample_state;
use crate::resume::schema::{blank_record, blank_section, ResumeVariant, SectionDef};
use crate::resume::store::{reduce, Action, FormState, Record};
use crate::resume::ResumeDraft;
use crate::state::{AppState, Slot};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub variant: ResumeVariant,
    /// Start from the example resume instead of empty sections.
    #[serde(default = "default_true")]
    pub with_sample: bool,
}

/// The snapshot plus the section list the editor should render it with.
#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub id: Uuid,
    pub variant: ResumeVariant,
    pub sections: &'static [SectionDef],
    pub state: FormState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeResponse {
    fn from_draft(id: Uuid, draft: &ResumeDraft) -> Self {
        ResumeResponse {
            id,
            variant: draft.variant,
            sections: draft.variant.sections(),
            state: draft.state.clone(),
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

fn blank_state(variant: ResumeVariant) -> FormState {
    variant
        .sections()
        .iter()
        .fold(FormState::new(), |state, def| {
            state.with_section(def.key, blank_section(def))
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Json<ResumeResponse> {
    let form = if request.with_sample {
        sample_state(request.variant)
    } else {
        blank_state(request.variant)
    };
    let id = Uuid::new_v4();
    let draft = ResumeDraft::new(request.variant, form);
    let response = ResumeResponse::from_draft(id, &draft);

    state.sessions.resumes.write().await.insert(id, Slot::new(draft));
    info!("Created {:?} resume draft {id}", request.variant);

    Json(response)
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resumes = state.sessions.resumes.read().await;
    let draft = &resumes.get(&id).ok_or_else(|| not_found(id))?.value;
    Ok(Json(ResumeResponse::from_draft(id, draft)))
}

/// POST /api/v1/resumes/:id/actions
///
/// Runs one store action and returns the resulting snapshot.
pub async fn handle_apply_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<Action>,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut resumes = state.sessions.resumes.write().await;
    let slot = resumes.get_mut(&id).ok_or_else(|| not_found(id))?;

    let next = reduce(&slot.value.state, action);
    if next != slot.value.state {
        slot.replace(ResumeDraft {
            variant: slot.value.variant,
            state: next,
            created_at: slot.value.created_at,
            updated_at: Utc::now(),
        });
    }

    Ok(Json(ResumeResponse::from_draft(id, &slot.value)))
}

/// GET /api/v1/resumes/:id/sections/:section/template
///
/// Empty record to send back with an `add_record` action.
pub async fn handle_section_template(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<Record>, AppError> {
    let resumes = state.sessions.resumes.read().await;
    let draft = &resumes.get(&id).ok_or_else(|| not_found(id))?.value;
    let def = draft
        .variant
        .section(&section)
        .ok_or_else(|| AppError::NotFound(format!("Section '{section}' not found")))?;
    Ok(Json(blank_record(def)))
}

/// GET /api/v1/resumes/:id/preview
///
/// Plain-text print preview of the current snapshot.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resumes = state.sessions.resumes.read().await;
    let draft = &resumes.get(&id).ok_or_else(|| not_found(id))?.value;
    let body = render_preview(draft.variant, &draft.state);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .resumes
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| not_found(id))?;
    info!("Discarded resume draft {id}");
    Ok(StatusCode::NO_CONTENT)
}
