pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::lottery::handlers as lottery;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::unlock::handlers as unlock;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Lottery ticket page
        .route("/api/v1/lottery/tickets", post(lottery::handle_quick_pick))
        .route(
            "/api/v1/lottery/tickets/:key",
            get(lottery::handle_get_ticket).delete(lottery::handle_delete_ticket),
        )
        .route(
            "/api/v1/lottery/tickets/:key/regenerate",
            post(lottery::handle_regenerate),
        )
        .route(
            "/api/v1/lottery/tickets/:key/receipt",
            get(lottery::handle_receipt),
        )
        // Colour unlock page
        .route(
            "/api/v1/unlock/sessions",
            post(unlock::handle_create_session),
        )
        .route(
            "/api/v1/unlock/sessions/:id",
            get(unlock::handle_get_session).delete(unlock::handle_delete_session),
        )
        .route(
            "/api/v1/unlock/sessions/:id/events",
            post(unlock::handle_event),
        )
        .route(
            "/api/v1/payments/reference/validate",
            post(unlock::handle_validate_reference),
        )
        // Resume builder
        .route("/api/v1/resumes", post(resume::handle_create_resume))
        .route(
            "/api/v1/resumes/:id",
            get(resume::handle_get_resume).delete(resume::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/actions",
            post(resume::handle_apply_action),
        )
        .route(
            "/api/v1/resumes/:id/sections/:section/template",
            get(resume::handle_section_template),
        )
        .route("/api/v1/resumes/:id/preview", get(resume::handle_preview))
        .with_state(state)
}
