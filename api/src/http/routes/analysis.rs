use axum::{
    routing::{get, post},
    Router,
};

use crate::{axum::state::AppState, http::controllers::AnalysisController};

pub fn mount() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(AnalysisController::analyze))
        .route("/checklist", get(AnalysisController::checklist))
        .route("/export", post(AnalysisController::export))
}
