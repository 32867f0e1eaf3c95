//! Shared fixtures: a scripted definition source, failing stores, and store builders.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use lexicon_daily::{
    Artifact, DayEntry, DefinitionSource, History, InMemoryStore, Store, StoreError, Stores,
    UsageLedger, WordCorpus, WordRecord,
};

/// Definition source that succeeds for every word except the listed misses,
/// and remembers what it was asked.
#[derive(Default)]
pub struct StubSource {
    misses: HashSet<String>,
    calls: AtomicUsize,
    asked: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn all_succeed() -> Self {
        Self::default()
    }

    pub fn missing(words: &[&str]) -> Self {
        Self {
            misses: words.iter().map(|w| w.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl DefinitionSource for StubSource {
    async fn lookup(&self, word: &str) -> Option<WordRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.asked.lock().unwrap().push(word.to_string());
        if self.misses.contains(word) {
            return None;
        }
        Some(record(word))
    }
}

/// A store whose saves always fail; loads return whatever it was seeded with.
pub struct FailingSaveStore<T> {
    inner: InMemoryStore<T>,
}

impl<T> FailingSaveStore<T> {
    pub fn with_value(value: T) -> Self {
        Self {
            inner: InMemoryStore::with_value(value),
        }
    }
}

impl<T: Artifact> Store<T> for FailingSaveStore<T> {
    fn load(&self) -> Result<T, StoreError> {
        self.inner.load()
    }

    fn save(&self, _value: &T) -> Result<(), StoreError> {
        Err(StoreError::Invalid("disk full".into()))
    }
}

pub fn record(word: &str) -> WordRecord {
    WordRecord {
        word: word.to_string(),
        pronunciation: format!("/{}/", word),
        audio_url: String::new(),
        meaning: format!("The meaning of {}.", word),
        example: format!("An example using {}.", word),
        synonyms: vec![],
        antonyms: vec![],
    }
}

pub fn entry(words: [&str; 3]) -> DayEntry {
    words.map(record)
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn corpus(words: &[&str]) -> WordCorpus {
    words.iter().collect()
}

pub fn ledger(words: &[&str]) -> UsageLedger {
    words.iter().copied().collect()
}

/// In-memory stores seeded with the given values, plus handles to inspect them.
pub struct MemoryStores {
    pub corpus: InMemoryStore<WordCorpus>,
    pub ledger: InMemoryStore<UsageLedger>,
    pub history: InMemoryStore<History>,
}

impl MemoryStores {
    pub fn seeded(corpus_words: &[&str], used: &[&str], history: History) -> Self {
        Self {
            corpus: InMemoryStore::with_value(corpus(corpus_words)),
            ledger: InMemoryStore::with_value(ledger(used)),
            history: InMemoryStore::with_value(history),
        }
    }

    pub fn stores(&self) -> Stores {
        Stores::new(
            Arc::new(self.corpus.clone()),
            Arc::new(self.ledger.clone()),
            Arc::new(self.history.clone()),
        )
    }
}
