use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

use crate::axum::state::{self, AppState};
use ::strategist::{Assistant, ChatModel, Embedder, Match, VectorIndex};

pub struct FakeEmbedder;

#[async_trait]
impl Embedder for FakeEmbedder {
    #[allow(clippy::cast_precision_loss)]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(vec![text.len() as f32])
    }
}

#[derive(Default)]
pub struct FakeIndex {
    pub matches: Vec<Match>,
    pub upserted: Mutex<Vec<String>>,
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn upsert(&self, id: &str, _: Vec<f32>, _: Map<String, Value>) -> Result<()> {
        self.upserted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn query(&self, _: Vec<f32>, top_k: usize) -> Result<Vec<Match>> {
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

/// Echoes the last line of the prompt, which is the question.
pub struct FakeChat;

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, _: &str, user: &str) -> Result<String> {
        Ok(format!("Answered {}", user.lines().last().unwrap_or_default()))
    }
}

pub fn hit(id: &str, content: &str) -> Match {
    Match {
        id: id.to_string(),
        score: 0.8,
        metadata: json!({ "id": id, "content": content }).as_object().cloned(),
    }
}

pub fn state_with(index: Arc<FakeIndex>) -> AppState {
    state::create(Assistant::new(
        Arc::new(FakeEmbedder),
        index,
        Arc::new(FakeChat),
        3,
    ))
}
