use anyhow::Context;
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
};
use axum_jsonschema::Json;
use futures::Stream;
use schemars::JsonSchema;
use serde::Serialize;
use std::convert::Infallible;
use tokio_stream::StreamExt;
use tracing::{error, info};

use crate::axum::{
    errors::{ApiError, ApiResult},
    state::AppState,
};
use ::strategist::{stream::PartialResult, Match, Report};

#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct AskRequest {
    query: String,
}

impl AskRequest {
    fn into_query(self) -> ApiResult<String> {
        let query = self.query.trim();

        if query.is_empty() {
            return Err(ApiError::ClientError("Enter a question first.".to_string()));
        }

        Ok(query.to_string())
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AskResponse {
    answer: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let query = req.into_query()?;

    let answer = state
        .assistant
        .ask(&query)
        .await
        .context("Failed to answer question.")?;

    Ok(Json(AskResponse { answer }))
}

#[derive(Debug, serde::Serialize)]
pub struct Reference {
    id: String,
    score: f32,
    content: Option<String>,
}

impl From<Match> for Reference {
    fn from(hit: Match) -> Self {
        Self {
            content: hit.content().map(ToString::to_string),
            id: hit.id,
            score: hit.score,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct StreamError {
    pub error: &'static str,
}

fn json_event(id: &str, data: impl Serialize) -> Event {
    Event::default()
        .id(id)
        .json_data(data)
        .unwrap_or_else(|_| Event::default().id("error").data("Failed to encode event."))
}

#[allow(clippy::unused_async)]
pub async fn stream(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let query = req.into_query()?;
    let stream = ::strategist::stream::ask(state.assistant.clone(), query);

    let stream = stream.map(|e| {
        let event = match e {
            Ok(PartialResult::References(results)) => json_event(
                "references",
                results.into_iter().map(Reference::from).collect::<Vec<_>>(),
            ),
            Ok(PartialResult::Answer(answer)) => Event::default().id("answer").data(answer),
            Err(err) => {
                error!("Failed to complete query: {err:#}");

                json_event(
                    "error",
                    StreamError {
                        error: "Failed to complete query.",
                    },
                )
            }
        };

        Ok::<_, Infallible>(event)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct IngestRequest {
    reports: Vec<Report>,
}

#[derive(Debug, serde::Serialize)]
pub struct IngestResponse {
    ingested: usize,
}

pub async fn ingest(
    State(state): State<AppState>,
    Json(IngestRequest { reports }): Json<IngestRequest>,
) -> ApiResult<Json<IngestResponse>> {
    let ingested = state
        .assistant
        .ingest(&reports)
        .await
        .context("Failed to load reports.")?;

    info!("Ingested {ingested} reports");

    Ok(Json(IngestResponse { ingested }))
}
