use async_fn_stream::try_fn_stream;
use futures::Stream;

use crate::{services::Match, Assistant};

pub enum PartialResult {
    Answer(String),
    References(Vec<Match>),
}

impl From<String> for PartialResult {
    fn from(answer: String) -> Self {
        Self::Answer(answer)
    }
}

impl From<&Vec<Match>> for PartialResult {
    fn from(results: &Vec<Match>) -> Self {
        Self::References(results.clone())
    }
}

/// Streams the retrieved references, then the answer.
pub fn ask(
    assistant: Assistant,
    query: String,
) -> impl Stream<Item = std::result::Result<PartialResult, anyhow::Error>> {
    try_fn_stream(|emitter| async move {
        let results = assistant.search(&query).await?;
        emitter.emit((&results).into()).await;

        let answer = assistant.answer(&query, &results).await?;
        emitter.emit(answer.into()).await;

        Ok(())
    })
}
