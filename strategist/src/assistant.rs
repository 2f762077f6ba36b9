use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    config::Config,
    ingest,
    openai::OpenAI,
    pinecone::Pinecone,
    prompt::{build_context, build_prompt, SYSTEM_PROMPT},
    services::{ChatModel, Embedder, Match, Report, VectorIndex},
};

pub const NO_DATA: &str = "No relevant data found in the knowledge base.";

/// Retrieval-augmented question answering over the knowledge base.
#[derive(Clone)]
pub struct Assistant {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    chat: Arc<dyn ChatModel>,
    top_k: usize,
}

impl Assistant {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        chat: Arc<dyn ChatModel>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            chat,
            top_k,
        }
    }

    /// Builds an assistant backed by OpenAI and the configured Pinecone index.
    ///
    /// # Errors
    ///
    /// Returns an error if the Pinecone index can't be found.
    pub async fn connect(config: &Config) -> Result<Self> {
        let openai = Arc::new(OpenAI::new(config));
        let index = Pinecone::connect(config).await?;

        Ok(Self::new(openai.clone(), Arc::new(index), openai, config.top_k))
    }

    /// Embeds and upserts a batch of reports.
    ///
    /// # Errors
    ///
    /// Returns the first upstream error, aborting the rest of the batch.
    pub async fn ingest(&self, reports: &[Report]) -> Result<usize> {
        ingest::ingest(self.embedder.as_ref(), self.index.as_ref(), reports).await
    }

    /// Finds the reports closest to `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding service or the index fail.
    pub async fn search(&self, query: &str) -> Result<Vec<Match>> {
        let vector = self.embedder.embed(query).await?;
        let matches = self.index.query(vector, self.top_k).await?;

        debug!("Found {} matches for {query:?}", matches.len());

        Ok(matches)
    }

    /// Answers `query` from previously retrieved `matches`.
    ///
    /// # Errors
    ///
    /// Returns an error if the chat model fails.
    pub async fn answer(&self, query: &str, matches: &[Match]) -> Result<String> {
        if matches.is_empty() {
            info!("No matches for {query:?}");
            return Ok(NO_DATA.to_string());
        }

        let prompt = build_prompt(query, &build_context(matches));

        self.chat.complete(SYSTEM_PROMPT, &prompt).await
    }

    /// Answers a question using the closest reports as context.
    ///
    /// # Errors
    ///
    /// Returns an error if any upstream service fails.
    pub async fn ask(&self, query: &str) -> Result<String> {
        let matches = self.search(query).await?;

        self.answer(query, &matches).await
    }
}
