use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";

const DEFAULT_SECRETS_PATH: &str = ".strategist/secrets.toml";
const DEFAULT_ENVIRONMENT: &str = "us-west1-gcp";
const DEFAULT_INDEX: &str = "blasting-strategist";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_CHAT_MODEL: &str = "gpt-4";
const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API keys missing! Set {} in the secrets file or environment variables.", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("${0} must be a positive integer")]
    InvalidNumber(&'static str),
}

/// Key/value pairs read from a local TOML secrets file.
#[derive(Debug, Default, Clone)]
pub struct Secrets(HashMap<String, String>);

impl Secrets {
    /// Path of the secrets file, `$STRATEGIST_SECRETS` or `.strategist/secrets.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        env::var("STRATEGIST_SECRETS")
            .map_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH), PathBuf::from)
    }

    /// Reads a flat TOML table of secrets. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No secrets file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse secrets file {}", path.display()))
    }

    /// Parses a flat TOML table. Non-string scalars are kept in their TOML form.
    ///
    /// # Errors
    ///
    /// Returns an error if the content isn't a valid TOML table.
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;

        Ok(Self(
            table
                .into_iter()
                .filter_map(|(key, value)| match value {
                    toml::Value::String(s) => Some((key, s)),
                    toml::Value::Table(_) | toml::Value::Array(_) => None,
                    other => Some((key, other.to_string())),
                })
                .collect(),
        ))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
    pub pinecone_api_key: String,
    pub pinecone_environment: String,
    pub pinecone_controller_url: String,
    pub pinecone_index_host: Option<String>,
    pub index_name: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub top_k: usize,
}

impl Config {
    /// Loads the configuration from the default secrets file, falling back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if either API key is absent.
    pub fn load() -> Result<Self> {
        let secrets = Secrets::load(&Secrets::default_path())?;

        Ok(Self::from_sources(&secrets, |key| env::var(key).ok())?)
    }

    /// Builds the configuration from the secrets store first, then `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required credential is missing or a numeric setting is malformed.
    pub fn from_sources<F>(secrets: &Secrets, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            secrets
                .get(key)
                .map(ToString::to_string)
                .or_else(|| env(key))
                .filter(|v| !v.trim().is_empty())
        };

        let (Some(openai_api_key), Some(pinecone_api_key)) =
            (lookup(OPENAI_API_KEY), lookup(PINECONE_API_KEY))
        else {
            return Err(ConfigError::MissingCredentials(
                [OPENAI_API_KEY, PINECONE_API_KEY]
                    .into_iter()
                    .filter(|key| lookup(*key).is_none())
                    .collect(),
            ));
        };

        let pinecone_environment =
            lookup("PINECONE_ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let top_k = match lookup("TOP_K") {
            Some(k) => k
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .ok_or(ConfigError::InvalidNumber("TOP_K"))?,
            None => DEFAULT_TOP_K,
        };

        Ok(Self {
            openai_api_key,
            pinecone_api_key,
            top_k,
            openai_api_base: lookup("OPENAI_API_BASE"),
            pinecone_index_host: lookup("PINECONE_INDEX_HOST"),
            pinecone_controller_url: lookup("PINECONE_CONTROLLER_URL")
                .unwrap_or_else(|| format!("https://controller.{pinecone_environment}.pinecone.io")),
            index_name: lookup("PINECONE_INDEX").unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            pinecone_environment,
        })
    }
}
