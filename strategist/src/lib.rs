#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod analysis;
mod assistant;
pub mod config;
pub mod export;
mod ingest;
pub mod openai;
pub mod pinecone;
mod prompt;
mod services;
pub mod stream;

pub use analysis::{analyze, report, roi, safety_checklist, Analysis, AnalysisReport, ProjectData};
pub use assistant::{Assistant, NO_DATA};
pub use config::{Config, ConfigError, Secrets};
pub use export::Export;
pub use ingest::{ingest, load_reports};
pub use openai::OpenAI;
pub use pinecone::Pinecone;
pub use prompt::{build_context, build_prompt, SYSTEM_PROMPT};
pub use services::{ChatModel, Embedder, Match, Report, VectorIndex};
