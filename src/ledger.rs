//! UsageLedger - every word that has ever been committed to some day.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::Artifact;

/// Append-only, ordered set of used words.
///
/// Persisted as a plain JSON array in insertion order. A hash index mirrors
/// the array for membership checks; duplicates in a loaded document collapse
/// to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UsageLedger {
    words: Vec<String>,
    index: HashSet<String>,
}

impl UsageLedger {
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Append `word` unless it is already present. Returns `true` if appended.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if !self.index.insert(word.clone()) {
            return false;
        }
        self.words.push(word);
        true
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<String>> for UsageLedger {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<UsageLedger> for Vec<String> {
    fn from(ledger: UsageLedger) -> Self {
        ledger.words
    }
}

impl<S: Into<String>> FromIterator<S> for UsageLedger {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ledger = UsageLedger::default();
        for word in iter {
            ledger.insert(word);
        }
        ledger
    }
}

impl Artifact for UsageLedger {
    const NAME: &'static str = "usage ledger";

    fn validate(&mut self) -> Result<(), String> {
        match self.words.iter().position(|w| w.is_empty()) {
            Some(empty) => Err(format!("empty word at index {}", empty)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_and_ordered() {
        let mut ledger = UsageLedger::default();
        assert!(ledger.insert("beta"));
        assert!(ledger.insert("alpha"));
        assert!(!ledger.insert("beta"));
        assert_eq!(ledger.words(), ["beta", "alpha"]);
    }

    #[test]
    fn loading_collapses_duplicates() {
        let mut ledger: UsageLedger = serde_json::from_str(r#"["one","two","one"]"#).unwrap();
        ledger.validate().unwrap();
        assert_eq!(ledger.words(), ["one", "two"]);
        assert!(ledger.contains("one"));
        assert!(!ledger.insert("two"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let ledger: UsageLedger = ["beta", "alpha"].into_iter().collect();
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"["beta","alpha"]"#);
    }

    #[test]
    fn validate_rejects_empty_words() {
        let mut ledger: UsageLedger = serde_json::from_str(r#"["one",""]"#).unwrap();
        assert!(ledger.validate().is_err());
    }
}
