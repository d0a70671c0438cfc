//! Axum route handlers for the background-colour unlock page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::{AppState, Slot};
use crate::unlock::flow::{
    catalog, transition, ColourOption, Feedback, FlowInput, UnlockEvent, UnlockSession,
};
use crate::unlock::validator::{PaymentReference, VerificationLevel};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub session: UnlockSession,
    pub catalog: &'static [ColourOption],
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub session_id: Uuid,
    pub session: UnlockSession,
    pub feedback: Feedback,
}

#[derive(Debug, Deserialize)]
pub struct ValidateReferenceRequest {
    pub reference: String,
}

/// `verification` is always reported so a passing check is never mistaken
/// for a confirmed payment.
#[derive(Debug, Serialize)]
pub struct ValidateReferenceResponse {
    pub valid: bool,
    pub reference: PaymentReference,
    pub verification: VerificationLevel,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Unlock session {id} not found"))
}

/// POST /api/v1/unlock/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session_id = Uuid::new_v4();
    let session = UnlockSession::default();
    state
        .sessions
        .unlocks
        .write()
        .await
        .insert(session_id, Slot::new(session.clone()));
    Json(SessionResponse {
        session_id,
        session,
        catalog: catalog(),
    })
}

/// GET /api/v1/unlock/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let sessions = state.sessions.unlocks.read().await;
    let slot = sessions
        .get(&session_id)
        .ok_or_else(|| not_found(session_id))?;
    Ok(Json(SessionResponse {
        session_id,
        session: slot.value.clone(),
        catalog: catalog(),
    }))
}

/// POST /api/v1/unlock/sessions/:id/events
///
/// Applies one dialog event. A rejected reference is reported in `feedback`
/// with 200, since the dialog simply stays open for correction.
///
/// The store lock is not held while the verifier runs. If the session changed
/// in the meantime, the verdict is stale and the event is reported as ignored.
pub async fn handle_event(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<UnlockEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let (input, seen) = match event {
        UnlockEvent::Select { colour } => (FlowInput::Select(colour), None),
        UnlockEvent::Input { text } => (FlowInput::Input(text), None),
        UnlockEvent::Cancel => (FlowInput::Cancel, None),
        UnlockEvent::Submit => {
            let seen = snapshot(&state, session_id).await?;
            let verdict = state.verifier.verify(&seen.reference_input).await;
            (FlowInput::Submit(verdict), Some(seen))
        }
    };

    let mut sessions = state.sessions.unlocks.write().await;
    let slot = sessions
        .get_mut(&session_id)
        .ok_or_else(|| not_found(session_id))?;

    if seen.is_some_and(|seen| seen != slot.value) {
        debug!("Session {session_id} changed during verification; dropping verdict");
        return Ok(Json(EventResponse {
            session_id,
            session: slot.value.clone(),
            feedback: Feedback::Ignored,
        }));
    }

    let step = transition(
        &slot.value,
        input,
        &state.config.payee,
        state.verifier.level(),
    )?;
    slot.replace(step.session.clone());

    Ok(Json(EventResponse {
        session_id,
        session: step.session,
        feedback: step.feedback,
    }))
}

async fn snapshot(state: &AppState, session_id: Uuid) -> Result<UnlockSession, AppError> {
    let sessions = state.sessions.unlocks.read().await;
    sessions
        .get(&session_id)
        .map(|slot| slot.value.clone())
        .ok_or_else(|| not_found(session_id))
}

/// DELETE /api/v1/unlock/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .unlocks
        .write()
        .await
        .remove(&session_id)
        .ok_or_else(|| not_found(session_id))?;
    info!("Closed unlock session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/payments/reference/validate
///
/// Standalone format check, as used by the unlock dialog's submit button.
pub async fn handle_validate_reference(
    State(state): State<AppState>,
    Json(request): Json<ValidateReferenceRequest>,
) -> Result<Json<ValidateReferenceResponse>, AppError> {
    let reference = state.verifier.verify(&request.reference).await?;
    Ok(Json(ValidateReferenceResponse {
        valid: true,
        reference,
        verification: state.verifier.level(),
    }))
}
