use axum::{routing::post, Router};

use crate::{axum::state::AppState, http::controllers::AssistantController};

pub fn mount() -> Router<AppState> {
    Router::new()
        .route("/ask", post(AssistantController::ask))
        .route("/ask/stream", post(AssistantController::stream))
        .route("/reports", post(AssistantController::ingest))
}
