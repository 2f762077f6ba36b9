use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{axum::state::AppState, http::routes};

pub fn create(state: AppState) -> Router {
    Router::new()
        .merge(routes::mount())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
