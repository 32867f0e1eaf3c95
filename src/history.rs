//! History - the enriched words chosen for each calendar day.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Artifact;

/// Number of words selected per day.
pub const WORDS_PER_DAY: usize = 3;

/// Placeholder used when the lookup service returns no definition.
pub const NO_DEFINITION: &str = "No definition available.";

/// Placeholder used when no definition carries an example sentence.
pub const NO_EXAMPLE: &str = "No example sentence available.";

/// One enriched word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    pub pronunciation: String,
    pub audio_url: String,
    pub meaning: String,
    pub example: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl WordRecord {
    /// A record carrying only the word and the fallback placeholders.
    pub fn bare(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: String::new(),
            audio_url: String::new(),
            meaning: NO_DEFINITION.to_string(),
            example: NO_EXAMPLE.to_string(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
        }
    }
}

/// A committed day: always exactly [`WORDS_PER_DAY`] records.
pub type DayEntry = [WordRecord; WORDS_PER_DAY];

/// Date-keyed history. Keys serialize as `YYYY-MM-DD`; a date is written at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    days: BTreeMap<NaiveDate, DayEntry>,
}

impl History {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.days.get(&date)
    }

    /// Record `entry` under `date` unless the date is already committed.
    /// Returns `false` (and leaves the existing entry untouched) otherwise.
    pub fn insert_new(&mut self, date: NaiveDate, entry: DayEntry) -> bool {
        if self.days.contains_key(&date) {
            return false;
        }
        self.days.insert(date, entry);
        true
    }

    /// All committed dates, most recent first.
    pub fn dates_desc(&self) -> Vec<NaiveDate> {
        self.days.keys().rev().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayEntry)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Artifact for History {
    const NAME: &'static str = "history";

    fn validate(&mut self) -> Result<(), String> {
        for (date, entry) in &self.days {
            let mut seen = HashSet::new();
            for record in entry {
                if record.word.is_empty() {
                    return Err(format!("{}: record with empty word", date));
                }
                if !seen.insert(record.word.as_str()) {
                    return Err(format!("{}: word '{}' appears twice", date, record.word));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(words: [&str; 3]) -> DayEntry {
        words.map(WordRecord::bare)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn dates_are_listed_newest_first() {
        let mut history = History::default();
        history.insert_new(date("2024-01-01"), entry(["one", "two", "three"]));
        history.insert_new(date("2024-01-03"), entry(["four", "five", "six"]));
        history.insert_new(date("2024-01-02"), entry(["seven", "eight", "nine"]));

        assert_eq!(
            history.dates_desc(),
            vec![date("2024-01-03"), date("2024-01-02"), date("2024-01-01")]
        );
    }

    #[test]
    fn insert_new_never_overwrites() {
        let day = date("2024-01-01");
        let mut history = History::default();
        assert!(history.insert_new(day, entry(["one", "two", "three"])));
        assert!(!history.insert_new(day, entry(["four", "five", "six"])));
        assert_eq!(history.get(day).unwrap()[0].word, "one");
    }

    #[test]
    fn serializes_with_date_keys_and_camel_case_fields() {
        let mut history = History::default();
        history.insert_new(date("2024-02-29"), entry(["one", "two", "three"]));

        let json = serde_json::to_value(&history).unwrap();
        let day = &json["2024-02-29"];
        assert_eq!(day.as_array().unwrap().len(), 3);
        assert_eq!(day[0]["audioUrl"], "");
        assert_eq!(day[0]["meaning"], NO_DEFINITION);
    }

    #[test]
    fn day_with_wrong_record_count_fails_to_decode() {
        let one = serde_json::to_value(WordRecord::bare("solo")).unwrap();
        let json = serde_json::json!({ "2024-01-01": [one.clone(), one] });
        assert!(serde_json::from_value::<History>(json).is_err());
    }

    #[test]
    fn non_date_key_fails_to_decode() {
        let records = serde_json::to_value(entry(["one", "two", "three"])).unwrap();
        let json = serde_json::json!({ "yesterday": records });
        assert!(serde_json::from_value::<History>(json).is_err());
    }

    #[test]
    fn validate_rejects_repeated_word_in_a_day() {
        let mut history = History::default();
        history.insert_new(date("2024-01-01"), entry(["one", "one", "three"]));
        assert!(history.validate().is_err());
    }
}
