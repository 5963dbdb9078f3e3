use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::book_appointment).get(handlers::list_appointments),
        )
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route(
            "/{appointment_id}/reschedule",
            put(handlers::reschedule_appointment),
        )
        .route(
            "/{appointment_id}/status",
            put(handlers::update_appointment_status),
        )
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/conflicts/check", post(handlers::check_conflicts))
        .with_state(state)
}
