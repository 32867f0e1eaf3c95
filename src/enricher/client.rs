//! HTTP client for the Free Dictionary API.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::api::{normalize_entry, ApiEntry};
use super::DefinitionSource;
use crate::history::WordRecord;

/// Why a lookup produced no record.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup service returned status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("lookup service returned no entries")]
    Empty,
}

impl LookupError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Status(_) => "status",
            LookupError::Transport(_) => "transport",
            LookupError::Decode(_) => "decode",
            LookupError::Empty => "empty",
        }
    }
}

/// [`DefinitionSource`] backed by `GET {base_url}/{word}`.
#[derive(Clone)]
pub struct DictionaryApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl DictionaryApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.dictionaryapi.dev/api/v2/entries/en";

    /// Build a client with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lexicon-daily/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Use an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and normalize `word`, surfacing the failure reason.
    pub async fn fetch(&self, word: &str) -> Result<WordRecord, LookupError> {
        let url = format!("{}/{}", self.base_url, word);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let entries: Vec<ApiEntry> = serde_json::from_slice(&body)?;
        let first = entries.first().ok_or(LookupError::Empty)?;
        Ok(normalize_entry(word, first))
    }
}

#[async_trait]
impl DefinitionSource for DictionaryApiClient {
    async fn lookup(&self, word: &str) -> Option<WordRecord> {
        match self.fetch(word).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(word, reason = e.kind(), error = %e, "definition lookup missed");
                None
            }
        }
    }
}
