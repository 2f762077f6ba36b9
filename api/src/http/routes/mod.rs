use axum::{routing::get, Json, Router};
use std::env;

mod analysis;
mod assistant;

use crate::{axum::state::AppState, http::controllers::FormController};

pub fn mount() -> Router<AppState> {
    Router::new()
        .merge(assistant::mount())
        .merge(analysis::mount())
        .route("/", get(FormController::show))
        .route("/version", get(version))
}

#[derive(serde::Serialize)]
struct StrategistVersion {
    semver: String,
    rev: Option<String>,
    compile_time: String,
}

#[allow(clippy::unused_async)]
async fn version() -> Json<StrategistVersion> {
    Json(StrategistVersion {
        rev: env::var("GIT_REV").ok(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        compile_time: env!("STATIC_BUILD_DATE").to_string(),
    })
}
