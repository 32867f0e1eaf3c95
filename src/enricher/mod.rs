//! Definition enrichment - turning a bare word into a [`WordRecord`].
//!
//! A lookup either yields a record or nothing. Failures of any kind (non-2xx
//! status, transport error, timeout, undecodable body, empty result) are
//! logged and reported as a miss; callers skip the word and move on.

mod api;
mod client;

use async_trait::async_trait;

use crate::history::WordRecord;

pub use api::{normalize_entry, ApiDefinition, ApiEntry, ApiMeaning, ApiPhonetic};
pub use client::{DictionaryApiClient, LookupError};

/// Something that can enrich a word.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Look up `word`. `None` means the word should be skipped.
    async fn lookup(&self, word: &str) -> Option<WordRecord>;
}
