//! Axum route handlers for the lottery ticket page.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lottery::receipt::{render_receipt, PaperWidth};
use crate::lottery::ticket::{PickRules, Ticket};
use crate::state::{AppState, Slot, TicketEntry};

/// Upper bound on numbers per ticket; rejection sampling is only cheap for small sets.
const MAX_PICK_COUNT: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Optional overrides of the configured quick-pick rules.
#[derive(Debug, Default, Deserialize)]
pub struct QuickPickRequest {
    pub count: Option<u32>,
    pub max: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub key: Uuid,
    pub ticket: Ticket,
    pub rules: PickRules,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptQuery {
    #[serde(default)]
    pub paper: PaperWidth,
}

impl QuickPickRequest {
    /// An empty body means "use the configured rules"; anything else must be
    /// a well-formed request.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(QuickPickRequest::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid quick pick request: {e}")))
    }
}

fn not_found(key: Uuid) -> AppError {
    AppError::NotFound(format!("Ticket {key} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/lottery/tickets
///
/// Issues a quick-pick ticket. Rules default to the configured pick count and range.
pub async fn handle_quick_pick(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TicketResponse>, AppError> {
    let request = QuickPickRequest::from_body(&body)?;
    let defaults = PickRules::from(&state.config.lottery);
    let rules = PickRules {
        count: request.count.unwrap_or(defaults.count),
        max: request.max.unwrap_or(defaults.max),
    };
    if rules.count > MAX_PICK_COUNT {
        return Err(AppError::Validation(format!(
            "count must be at most {MAX_PICK_COUNT}"
        )));
    }

    let ticket = Ticket::quick_pick(&mut rand::thread_rng(), rules, &state.config.lottery)?;
    let key = Uuid::new_v4();
    info!("Issued ticket {} ({key})", ticket.id);

    state.sessions.tickets.write().await.insert(
        key,
        Slot::new(TicketEntry {
            ticket: ticket.clone(),
            rules,
        }),
    );

    Ok(Json(TicketResponse { key, ticket, rules }))
}

/// GET /api/v1/lottery/tickets/:key
pub async fn handle_get_ticket(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<Json<TicketResponse>, AppError> {
    let tickets = state.sessions.tickets.read().await;
    let entry = &tickets.get(&key).ok_or_else(|| not_found(key))?.value;
    Ok(Json(TicketResponse {
        key,
        ticket: entry.ticket.clone(),
        rules: entry.rules,
    }))
}

/// POST /api/v1/lottery/tickets/:key/regenerate
///
/// Re-rolls both the ticket id and the numbers, replacing the stored ticket.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<Json<TicketResponse>, AppError> {
    let mut tickets = state.sessions.tickets.write().await;
    let slot = tickets.get_mut(&key).ok_or_else(|| not_found(key))?;

    let rules = slot.value.rules;
    let ticket = slot.value.ticket.regenerate(&mut rand::thread_rng(), rules)?;
    info!("Regenerated ticket {} -> {} ({key})", slot.value.ticket.id, ticket.id);
    slot.replace(TicketEntry {
        ticket: ticket.clone(),
        rules,
    });

    Ok(Json(TicketResponse { key, ticket, rules }))
}

/// GET /api/v1/lottery/tickets/:key/receipt?paper=58mm|80mm
///
/// Plain-text thermal receipt for the browser's print dialog.
pub async fn handle_receipt(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
    Query(query): Query<ReceiptQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = state.sessions.tickets.read().await;
    let entry = &tickets.get(&key).ok_or_else(|| not_found(key))?.value;
    let body = render_receipt(&entry.ticket, query.paper);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

/// DELETE /api/v1/lottery/tickets/:key
pub async fn handle_delete_ticket(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .tickets
        .write()
        .await
        .remove(&key)
        .ok_or_else(|| not_found(key))?;
    info!("Discarded ticket {key}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_uses_configured_rules() {
        let request = QuickPickRequest::from_body(b"").unwrap();
        assert!(request.count.is_none() && request.max.is_none());
        assert!(QuickPickRequest::from_body(b"  \n").is_ok());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        for body in [r#"{"count":"ten","max":5}"#, r#"{"count":-3}"#, "not json"] {
            assert!(matches!(
                QuickPickRequest::from_body(body.as_bytes()),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_partial_override() {
        let request = QuickPickRequest::from_body(br#"{"max": 20}"#).unwrap();
        assert_eq!(request.count, None);
        assert_eq!(request.max, Some(20));
    }
}
