use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/skills/:id/quick-log", post(handlers::quick_log_form))
        .route(
            "/api/skills",
            get(handlers::list_skills).post(handlers::create_skill),
        )
        .route(
            "/api/skills/:id",
            put(handlers::update_skill).delete(handlers::delete_skill),
        )
        .route("/api/skills/:id/quick-log", post(handlers::quick_log))
        .route("/api/logs", get(handlers::list_logs).post(handlers::add_log))
        .route(
            "/api/logs/:id",
            put(handlers::update_log).delete(handlers::delete_log),
        )
        .route("/api/report", get(handlers::get_report))
        .with_state(state)
}
