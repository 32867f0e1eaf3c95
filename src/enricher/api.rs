//! Response shape of the dictionary lookup service, and its normalization
//! into a [`WordRecord`].

use serde::Deserialize;

use crate::history::{WordRecord, NO_DEFINITION, NO_EXAMPLE};

/// One entry of the lookup response array. Only the first entry is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiEntry {
    pub word: String,
    pub phonetic: Option<String>,
    pub phonetics: Vec<ApiPhonetic>,
    pub meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiPhonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiMeaning {
    pub definitions: Vec<ApiDefinition>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiDefinition {
    pub definition: String,
    pub example: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Map a lookup entry for `word` to a record, filling fallbacks for
/// anything the entry lacks.
pub fn normalize_entry(word: &str, entry: &ApiEntry) -> WordRecord {
    let pronunciation = non_empty(&entry.phonetic)
        .or_else(|| entry.phonetics.iter().find_map(|p| non_empty(&p.text)))
        .unwrap_or_default()
        .to_string();

    let audio_url = entry
        .phonetics
        .iter()
        .find_map(|p| non_empty(&p.audio))
        .unwrap_or_default()
        .to_string();

    let first_meaning = entry.meanings.first();
    let definitions = first_meaning
        .map(|m| m.definitions.as_slice())
        .unwrap_or_default();

    let meaning = definitions
        .first()
        .map(|d| d.definition.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DEFINITION)
        .to_string();

    let example = definitions
        .iter()
        .find_map(|d| non_empty(&d.example))
        .unwrap_or(NO_EXAMPLE)
        .to_string();

    let (synonyms, antonyms) = first_meaning
        .map(|m| (m.synonyms.clone(), m.antonyms.clone()))
        .unwrap_or_default();

    WordRecord {
        word: word.to_string(),
        pronunciation,
        audio_url,
        meaning,
        example,
        synonyms,
        antonyms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> ApiEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_entry() {
        let e = entry(json!({
            "word": "serene",
            "phonetic": "/səˈɹiːn/",
            "phonetics": [
                { "text": "/səˈɹiːn/", "audio": "" },
                { "text": "/sɪˈɹiːn/", "audio": "https://audio.example/serene.mp3" }
            ],
            "meanings": [
                {
                    "partOfSpeech": "adjective",
                    "definitions": [
                        { "definition": "Peaceful, calm.", "synonyms": [] },
                        { "definition": "Unclouded.", "example": "a serene sky" }
                    ],
                    "synonyms": ["calm", "tranquil"],
                    "antonyms": ["agitated"]
                },
                {
                    "definitions": [{ "definition": "ignored", "example": "ignored" }],
                    "synonyms": ["ignored"]
                }
            ]
        }));

        let record = normalize_entry("serene", &e);
        assert_eq!(record.word, "serene");
        assert_eq!(record.pronunciation, "/səˈɹiːn/");
        assert_eq!(record.audio_url, "https://audio.example/serene.mp3");
        assert_eq!(record.meaning, "Peaceful, calm.");
        assert_eq!(record.example, "a serene sky");
        assert_eq!(record.synonyms, ["calm", "tranquil"]);
        assert_eq!(record.antonyms, ["agitated"]);
    }

    #[test]
    fn pronunciation_falls_back_to_first_phonetic_with_text() {
        let e = entry(json!({
            "word": "gale",
            "phonetic": "",
            "phonetics": [{ "audio": "a.mp3" }, { "text": "" }, { "text": "/ɡeɪl/" }]
        }));
        let record = normalize_entry("gale", &e);
        assert_eq!(record.pronunciation, "/ɡeɪl/");
        assert_eq!(record.audio_url, "a.mp3");
    }

    #[test]
    fn empty_entry_uses_placeholders() {
        let record = normalize_entry("void", &ApiEntry::default());
        assert_eq!(record, WordRecord::bare("void"));
    }

    #[test]
    fn meaning_without_definitions_uses_placeholders_but_keeps_synonyms() {
        let e = entry(json!({
            "meanings": [{ "definitions": [], "synonyms": ["alike"], "antonyms": [] }]
        }));
        let record = normalize_entry("same", &e);
        assert_eq!(record.meaning, NO_DEFINITION);
        assert_eq!(record.example, NO_EXAMPLE);
        assert_eq!(record.synonyms, ["alike"]);
    }

    #[test]
    fn null_optional_fields_decode() {
        let e = entry(json!({
            "word": "null",
            "phonetic": null,
            "phonetics": [{ "text": null, "audio": null }]
        }));
        let record = normalize_entry("null", &e);
        assert_eq!(record.pronunciation, "");
        assert_eq!(record.audio_url, "");
    }
}
