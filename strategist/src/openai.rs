use anyhow::Result;
use async_openai::{
    types::{
        ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs,
        CreateEmbeddingRequestArgs, Role,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::Config,
    services::{ChatModel, Embedder},
};

pub struct OpenAI {
    client: Client,
    embedding_model: String,
    chat_model: String,
}

impl OpenAI {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let backoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::from_secs(60)))
            .build();

        let mut client = Client::new()
            .with_api_key(&config.openai_api_key)
            .with_backoff(backoff);

        if let Some(api_base) = &config.openai_api_base {
            client = client.with_api_base(api_base);
        }

        Self {
            client,
            embedding_model: config.embedding_model.clone(),
            chat_model: config.chat_model.clone(),
        }
    }
}

#[async_trait]
impl Embedder for OpenAI {
    /// Embeds a string into a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the Embeddings API returns an error.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.embedding_model)
            .input(text)
            .build()?;

        let response = self.client.embeddings().create(request).await?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Could not find embedding"))?
            .embedding;

        debug!("Embedded {} chars into {} dimensions", text.len(), embedding.len());

        Ok(embedding)
    }
}

#[async_trait]
impl ChatModel for OpenAI {
    /// Asks the chat model to answer `user` under the `system` persona.
    ///
    /// # Errors
    ///
    /// Returns an error if the Chat Completions API returns an error.
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .messages([
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::System)
                    .content(system)
                    .build()?,
                ChatCompletionRequestMessageArgs::default()
                    .role(Role::User)
                    .content(user)
                    .build()?,
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Could not find completion"))?
            .message
            .content)
    }
}
