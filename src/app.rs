use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/catches", post(handlers::create_catch))
        .route("/catches/:id", post(handlers::update_catch))
        .route("/catches/:id/edit", get(handlers::edit_catch))
        .route("/catches/:id/delete", post(handlers::delete_catch))
        .route("/charts", get(handlers::charts))
        .route("/api/catches", get(handlers::list_catches))
        .route("/api/charts/:kind", get(handlers::get_chart))
        .with_state(state)
}
