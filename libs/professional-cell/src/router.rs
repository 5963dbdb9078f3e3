use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn professional_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_professionals))
        .route("/{professional_id}", get(handlers::get_professional))
        .route(
            "/{professional_id}/work-intervals",
            get(handlers::get_work_intervals),
        )
        .route(
            "/{professional_id}/available-slots",
            get(handlers::get_available_slots),
        )
        .with_state(state)
}
