//! Word corpus - the candidate words, and the offline transform that builds them.
//!
//! The corpus is produced once from a comma-delimited source where the first
//! field of each line is a candidate token, then read-only at runtime.
//!
//! ```ignore
//! let written = lexicon_daily::build_corpus_file("raw/words.csv", "data/words.json")?;
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::StoreError;
use crate::store::{Artifact, JsonFileStore, Store};

/// Separator between fields of a raw source line.
pub const FIELD_SEPARATOR: char = ',';

/// Minimum word length (exclusive).
const MIN_LEN_EXCLUSIVE: usize = 2;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `true` if `token` is longer than two characters and made only of ASCII letters.
pub fn is_valid_word(token: &str) -> bool {
    token.len() > MIN_LEN_EXCLUSIVE && token.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Deduplicated list of candidate words, first-seen order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordCorpus {
    words: Vec<String>,
}

impl WordCorpus {
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

impl<S: AsRef<str>> FromIterator<S> for WordCorpus {
    /// Keeps valid tokens only, deduplicated.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for token in iter {
            let token: &str = token.as_ref();
            if is_valid_word(token) && seen.insert(token.to_string()) {
                words.push(token.to_string());
            }
        }
        Self { words }
    }
}

impl Artifact for WordCorpus {
    const NAME: &'static str = "word corpus";

    fn validate(&mut self) -> Result<(), String> {
        if let Some(bad) = self.words.iter().find(|w| !is_valid_word(w)) {
            return Err(format!("'{}' is not a valid word", bad));
        }
        let mut seen = HashSet::new();
        self.words.retain(|w| seen.insert(w.clone()));
        Ok(())
    }
}

/// Build a corpus from raw delimited lines.
///
/// The first field of each line is trimmed and kept only if it passes
/// [`is_valid_word`]; later duplicates are dropped.
pub fn build_corpus<R: BufRead>(reader: R) -> io::Result<WordCorpus> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let first = line.split(FIELD_SEPARATOR).next().unwrap_or("").trim();
        if !first.is_empty() {
            tokens.push(first.to_string());
        }
    }
    Ok(tokens.into_iter().collect())
}

/// Read `input`, build the corpus, and write it to `output` as JSON.
/// Returns the number of words written.
pub fn build_corpus_file(
    input: impl AsRef<Path>,
    output: impl Into<PathBuf>,
) -> Result<usize, CorpusError> {
    let input = input.as_ref();
    let source_err = |source| CorpusError::Source {
        path: input.to_path_buf(),
        source,
    };

    let file = File::open(input).map_err(source_err)?;
    let corpus = build_corpus(BufReader::new(file)).map_err(source_err)?;

    let store = JsonFileStore::<WordCorpus>::new(output);
    store.save(&corpus)?;
    tracing::info!(
        input = %input.display(),
        output = %store.path().display(),
        words = corpus.len(),
        "corpus built"
    );
    Ok(corpus.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_words() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("Zebra"));
        assert!(!is_valid_word("ox"));
        assert!(!is_valid_word(""));
        assert!(!is_valid_word("don't"));
        assert!(!is_valid_word("abc1"));
        assert!(!is_valid_word("two words"));
        assert!(!is_valid_word("café"));
    }

    #[test]
    fn takes_first_field_trimmed() {
        let raw = "  apple ,12\nbanana,3,extra\n\ncherry\n";
        let corpus = build_corpus(raw.as_bytes()).unwrap();
        assert_eq!(corpus.words(), ["apple", "banana", "cherry"]);
    }

    #[test]
    fn filters_and_deduplicates_preserving_first_seen_order() {
        let raw = "pear,1\nox,2\nplum,3\npear,4\nfig5,5\n,6\nPlum,7\n";
        let corpus = build_corpus(raw.as_bytes()).unwrap();
        assert_eq!(corpus.words(), ["pear", "plum", "Plum"]);
    }

    #[test]
    fn validate_rejects_invalid_entries() {
        let mut corpus: WordCorpus = serde_json::from_str(r#"["apple","a1"]"#).unwrap();
        assert!(corpus.validate().is_err());
    }
}
