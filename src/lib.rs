//! lexicon_daily: a word-of-the-day engine.
//!
//! Once per UTC day the [`SelectionEngine`] samples three unused words from the
//! [`WordCorpus`], enriches each through a [`DefinitionSource`], and commits the
//! records to the [`History`] and the words to the [`UsageLedger`]. The
//! [`retrieval`] functions (and the `http` router on top of them) read the
//! history back by date.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use lexicon_daily::{DictionaryApiClient, SelectionEngine, Stores};
//!
//! let stores = Stores::json_files("data/words.json", "data/used_words.json", "data/history.json");
//! let source = DictionaryApiClient::new(DictionaryApiClient::DEFAULT_BASE_URL, timeout)?;
//! let engine = SelectionEngine::new(stores.clone(), Arc::new(source));
//!
//! let outcome = engine.ensure_today().await?;
//! let dates = lexicon_daily::retrieval::list_dates(stores.history.as_ref())?;
//! ```

pub mod config;
pub mod corpus;
pub mod enricher;
pub mod engine;
mod error;
pub mod history;
pub mod ledger;
pub mod retrieval;
pub mod scheduler;
pub mod store;
pub mod telemetry;

#[cfg(feature = "http")]
pub mod http;

pub use config::AppConfig;
pub use corpus::{build_corpus, build_corpus_file, is_valid_word, CorpusError, WordCorpus};
pub use engine::{EngineError, RunOutcome, SelectionEngine};
pub use enricher::{DefinitionSource, DictionaryApiClient, LookupError};
pub use error::StoreError;
pub use history::{DayEntry, History, WordRecord, WORDS_PER_DAY};
pub use ledger::UsageLedger;
pub use retrieval::RetrievalError;
pub use scheduler::DailyScheduler;
pub use store::{Artifact, InMemoryStore, JsonFileStore, Store, Stores};
