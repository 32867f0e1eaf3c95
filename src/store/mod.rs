//! Stores - whole-document persistence for the corpus, ledger, and history.
//!
//! A store holds exactly one value of its artifact type. There is no patch
//! API: callers `load`, mutate in memory, and `save` the whole value back.
//!
//! ## Example
//!
//! ```ignore
//! use lexicon_daily::{JsonFileStore, Store, UsageLedger};
//!
//! let store = JsonFileStore::<UsageLedger>::new("data/used_words.json");
//! let mut ledger = store.load()?; // empty ledger if the file does not exist yet
//! ledger.insert("lantern");
//! store.save(&ledger)?;
//! ```

mod in_memory;
mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::corpus::WordCorpus;
use crate::error::StoreError;
use crate::history::History;
use crate::ledger::UsageLedger;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// A value that can be persisted as a single JSON document.
pub trait Artifact: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    /// Human-readable artifact name, used in logs and error messages.
    const NAME: &'static str;

    /// Validate (and where safe, canonicalize) a freshly loaded value.
    ///
    /// Returning `Err` turns the load into a [`StoreError::Invalid`].
    fn validate(&mut self) -> Result<(), String> {
        Ok(())
    }
}

/// Load/save access to one persisted artifact.
pub trait Store<T: Artifact>: Send + Sync {
    /// Return the persisted value, or `T::default()` if nothing has been saved yet.
    fn load(&self) -> Result<T, StoreError>;

    /// Replace the persisted value. The last save wins.
    fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// The three stores the service works against, shared between the
/// selection engine and the retrieval handlers.
#[derive(Clone)]
pub struct Stores {
    pub corpus: Arc<dyn Store<WordCorpus>>,
    pub ledger: Arc<dyn Store<UsageLedger>>,
    pub history: Arc<dyn Store<History>>,
}

impl Stores {
    pub fn new(
        corpus: Arc<dyn Store<WordCorpus>>,
        ledger: Arc<dyn Store<UsageLedger>>,
        history: Arc<dyn Store<History>>,
    ) -> Self {
        Self {
            corpus,
            ledger,
            history,
        }
    }

    /// JSON files at the given paths.
    pub fn json_files(
        corpus: impl Into<PathBuf>,
        ledger: impl Into<PathBuf>,
        history: impl Into<PathBuf>,
    ) -> Self {
        Self::new(
            Arc::new(JsonFileStore::new(corpus)),
            Arc::new(JsonFileStore::new(ledger)),
            Arc::new(JsonFileStore::new(history)),
        )
    }
}
