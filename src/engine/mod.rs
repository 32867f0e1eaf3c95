//! Daily selection - picks, enriches, and commits the words for a date.
//!
//! Each date is either pending (no history entry) or committed. A run on a
//! committed date is a no-op; a run on a pending date either commits exactly
//! [`WORDS_PER_DAY`] words to both stores or writes nothing at all.
//!
//! ## Example
//!
//! ```ignore
//! let engine = SelectionEngine::new(stores, Arc::new(client));
//! match engine.ensure_today().await? {
//!     RunOutcome::Committed { words, .. } => println!("today: {:?}", words),
//!     other => println!("nothing committed: {:?}", other),
//! }
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::enricher::DefinitionSource;
use crate::error::StoreError;
use crate::history::{DayEntry, History, WORDS_PER_DAY};
use crate::ledger::UsageLedger;
use crate::store::Stores;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The date already had an entry; nothing was done.
    AlreadyCommitted { date: NaiveDate },
    /// Three words were enriched and written to both stores.
    Committed { date: NaiveDate, words: Vec<String> },
    /// Fewer unused words remain than a day needs.
    InsufficientPool { date: NaiveDate, available: usize },
    /// The pool ran out before enough lookups succeeded.
    Shortfall {
        date: NaiveDate,
        accepted: usize,
        tried: usize,
    },
}

impl RunOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            RunOutcome::Committed { .. } | RunOutcome::AlreadyCommitted { .. }
        )
    }
}

/// Orchestrates the corpus, ledger, history, and definition source.
///
/// Runs are serialized: concurrent callers (startup, timer, admin trigger)
/// queue behind one another, and each re-checks the history once it gets in.
pub struct SelectionEngine {
    stores: Stores,
    source: Arc<dyn DefinitionSource>,
    run_lock: Mutex<()>,
}

impl SelectionEngine {
    pub fn new(stores: Stores, source: Arc<dyn DefinitionSource>) -> Self {
        Self {
            stores,
            source,
            run_lock: Mutex::new(()),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Make sure the current UTC date has an entry.
    pub async fn ensure_today(&self) -> Result<RunOutcome, EngineError> {
        self.ensure_for(Utc::now().date_naive()).await
    }

    /// Make sure `date` has an entry.
    pub async fn ensure_for(&self, date: NaiveDate) -> Result<RunOutcome, EngineError> {
        let _guard = self.run_lock.lock().await;

        let mut history = self.stores.history.load()?;
        if history.contains(date) {
            tracing::debug!(%date, "date already committed");
            return Ok(RunOutcome::AlreadyCommitted { date });
        }

        let corpus = self.stores.corpus.load()?;
        let mut ledger = self.stores.ledger.load()?;

        let mut pool: Vec<String> = corpus
            .words()
            .iter()
            .filter(|w| !ledger.contains(w))
            .cloned()
            .collect();

        if pool.len() < WORDS_PER_DAY {
            tracing::warn!(
                %date,
                available = pool.len(),
                corpus = corpus.len(),
                used = ledger.len(),
                "not enough unused words left for a daily selection"
            );
            return Ok(RunOutcome::InsufficientPool {
                date,
                available: pool.len(),
            });
        }

        pool.shuffle(&mut rand::thread_rng());

        let mut words = Vec::with_capacity(WORDS_PER_DAY);
        let mut records = Vec::with_capacity(WORDS_PER_DAY);
        let mut tried = 0;
        for word in pool {
            if records.len() == WORDS_PER_DAY {
                break;
            }
            tried += 1;
            match self.source.lookup(&word).await {
                Some(record) => {
                    tracing::debug!(%date, word = %word, "word accepted");
                    words.push(word);
                    records.push(record);
                }
                None => tracing::debug!(%date, word = %word, "word skipped"),
            }
        }

        let entry = match DayEntry::try_from(records) {
            Ok(entry) => entry,
            Err(short) => {
                tracing::warn!(
                    %date,
                    accepted = short.len(),
                    tried,
                    "too few words could be enriched; nothing committed"
                );
                return Ok(RunOutcome::Shortfall {
                    date,
                    accepted: short.len(),
                    tried,
                });
            }
        };

        self.commit(date, &words, entry, &mut history, &mut ledger)?;
        tracing::info!(%date, ?words, tried, "daily selection committed");
        Ok(RunOutcome::Committed { date, words })
    }

    /// Write the ledger, then the history. If the history write fails the
    /// previous ledger is put back so neither store shows a partial commit.
    fn commit(
        &self,
        date: NaiveDate,
        words: &[String],
        entry: DayEntry,
        history: &mut History,
        ledger: &mut UsageLedger,
    ) -> Result<(), EngineError> {
        let previous_ledger = ledger.clone();
        for word in words {
            ledger.insert(word.clone());
        }
        history.insert_new(date, entry);

        self.stores.ledger.save(ledger)?;
        if let Err(e) = self.stores.history.save(history) {
            tracing::error!(%date, error = %e, "history write failed; restoring usage ledger");
            if let Err(restore) = self.stores.ledger.save(&previous_ledger) {
                tracing::error!(%date, error = %restore, "usage ledger restore failed");
            }
            return Err(e.into());
        }
        Ok(())
    }
}
