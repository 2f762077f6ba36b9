use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    services::{Match, VectorIndex},
};

pub struct Pinecone {
    client: Client,
    api_key: String,
    controller_url: String,
}

#[derive(Debug, serde::Deserialize)]
struct IndexDescription {
    #[serde(default)]
    database: Option<IndexDatabase>,
    status: IndexStatus,
}

#[derive(Debug, serde::Deserialize)]
struct IndexDatabase {
    dimension: Option<usize>,
}

#[derive(Debug, serde::Deserialize)]
struct IndexStatus {
    host: String,
}

#[derive(Debug, serde::Serialize)]
struct Vector<'a> {
    id: &'a str,
    values: Vec<f32>,
    metadata: Map<String, Value>,
}

#[derive(Debug, serde::Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

impl Pinecone {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.pinecone_api_key.clone(),
            controller_url: config.pinecone_controller_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lists the indexes available to this API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the Pinecone API returns an error.
    pub async fn list_indexes(&self) -> Result<Vec<String>> {
        self.client
            .get(format!("{}/databases", self.controller_url))
            .header("Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse index list")
    }

    /// Resolves the data-plane host and vector dimension of an index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index doesn't exist or the Pinecone API returns an error.
    pub async fn describe_index(&self, name: &str) -> Result<IndexInfo> {
        let description: IndexDescription = self
            .client
            .get(format!("{}/databases/{name}", self.controller_url))
            .header("Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse index description")?;

        Ok(IndexInfo {
            host: description.status.host,
            dimension: description.database.and_then(|d| d.dimension),
        })
    }

    /// Connects to the configured index, making sure it exists first.
    ///
    /// # Errors
    ///
    /// Returns an error if the index isn't one of the available indexes.
    pub async fn connect(config: &Config) -> Result<Index> {
        let pinecone = Self::new(config);
        let indexes = pinecone.list_indexes().await?;

        if !indexes.contains(&config.index_name) {
            anyhow::bail!(
                "Pinecone index '{}' not found. Available indexes: {indexes:?}",
                config.index_name
            );
        }

        let info = pinecone.describe_index(&config.index_name).await?;
        let host = config.pinecone_index_host.clone().unwrap_or(info.host);

        info!("Connected to Pinecone index {} at {host}", config.index_name);
        match info.dimension {
            Some(dimension) => info!(
                "Index {} expects {dimension}-dimension vectors from {}",
                config.index_name, config.embedding_model
            ),
            None => warn!("Index {} didn't report its dimension", config.index_name),
        }

        let index = pinecone.index(&host);

        Ok(match info.dimension {
            Some(dimension) => index.with_dimension(dimension),
            None => index,
        })
    }

    #[must_use]
    pub fn index(self, host: &str) -> Index {
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("https://{host}")
        };

        Index::new(self.client, self.api_key, base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub host: String,
    pub dimension: Option<usize>,
}

pub struct Index {
    client: Client,
    api_key: String,
    base_url: String,
    dimension: Option<usize>,
}

impl Index {
    pub const fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            dimension: None,
        }
    }

    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    #[must_use]
    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

#[async_trait]
impl VectorIndex for Index {
    async fn upsert(&self, id: &str, values: Vec<f32>, metadata: Map<String, Value>) -> Result<()> {
        if let Some(dimension) = self.dimension.filter(|d| *d != values.len()) {
            warn!(
                "Vector {id} has {} dimensions, the index expects {dimension}",
                values.len()
            );
        }

        self.client
            .post(format!("{}/vectors/upsert", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&json!({
                "vectors": [Vector { id, values, metadata }]
            }))
            .send()
            .await?
            .error_for_status()?;

        debug!("Upserted vector {id}");

        Ok(())
    }

    async fn query(&self, values: Vec<f32>, top_k: usize) -> Result<Vec<Match>> {
        let response: QueryResponse = self
            .client
            .post(format!("{}/query", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&json!({
                "vector": values,
                "topK": top_k,
                "includeMetadata": true,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse query response")?;

        debug!("Query returned {} matches", response.matches.len());

        Ok(response.matches)
    }
}
