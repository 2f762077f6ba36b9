use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A text report stored in the knowledge base.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct Report {
    pub id: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// The report as a flat metadata object, `id` and `content` included.
    ///
    /// # Errors
    ///
    /// Fails if the report can't be represented as a JSON object.
    pub fn metadata(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(anyhow::anyhow!("Report {} is not a JSON object", self.id)),
        }
    }
}

/// A nearest-neighbour hit returned by the index.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Match {
    /// The stored report text, if the metadata carries one.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, id: &str, values: Vec<f32>, metadata: Map<String, Value>) -> Result<()>;

    async fn query(&self, values: Vec<f32>, top_k: usize) -> Result<Vec<Match>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
