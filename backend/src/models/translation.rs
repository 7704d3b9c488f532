//! Per-language wording overrides.
//!
//! The translations document maps a ref id to a map of language code to an
//! entry. An entry is either a bare string (the translated question) or an
//! object carrying `question` and/or `question_description`:
//!
//! ```json
//! {
//!   "translations": {
//!     "SAT_01": {
//!       "fr": "Êtes-vous satisfait ?",
//!       "de": { "question": "Sind Sie zufrieden?", "question_description": "0 bis 10" }
//!     }
//!   }
//! }
//! ```
//!
//! The document is read leniently: anything that does not fit one of the two
//! shapes is dropped with a warning instead of failing the whole load.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::logs::log_warning;

/// Wording fields a translation may replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordingOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_description: Option<String>,
}

/// One translation of one ref into one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationEntry {
    /// Shorthand: translated question only.
    Plain(String),
    /// Question and/or description overrides.
    Structured(WordingOverride),
}

impl TranslationEntry {
    /// Resolve to the wording fields this entry overrides.
    pub fn wording(&self) -> WordingOverride {
        match self {
            TranslationEntry::Plain(question) => WordingOverride {
                question: Some(question.clone()),
                question_description: None,
            },
            TranslationEntry::Structured(wording) => wording.clone(),
        }
    }

    /// Read one entry from the document.
    ///
    /// Returns `None` for shapes that carry no usable override: an empty
    /// string, a number, an array, `null`. Non-string fields of an object are
    /// ignored so the record's own wording is used for them.
    fn from_value(ref_id: &str, lang: &str, value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(TranslationEntry::Plain(s.clone())),
            Value::Object(fields) => Some(TranslationEntry::Structured(WordingOverride {
                question: string_field(ref_id, lang, fields, "question"),
                question_description: string_field(ref_id, lang, fields, "question_description"),
            })),
            Value::Null => None,
            other => {
                log_warning(format!(
                    "Ignoring translation {}/{}: expected string or object, got {}",
                    ref_id,
                    lang,
                    json_kind(other)
                ));
                None
            }
        }
    }
}

fn string_field(ref_id: &str, lang: &str, fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(other) => {
            log_warning(format!(
                "Ignoring translation {}/{} field '{}': expected string, got {}",
                ref_id,
                lang,
                key,
                json_kind(other)
            ));
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Translation set
// =============================================================================

/// All translations, keyed by ref id then language code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Translations {
    entries: BTreeMap<String, BTreeMap<String, TranslationEntry>>,
}

impl Translations {
    /// An empty set: every lookup falls back to the catalog wording.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the translations document (`{"translations": {...}}`).
    ///
    /// A document without a `translations` object yields an empty set.
    /// Unusable parts are skipped with a warning.
    pub fn from_document(document: &Value) -> Self {
        let Some(by_ref) = document.get("translations").and_then(Value::as_object) else {
            log_warning("Translations document has no \"translations\" object, ignoring it");
            return Self::empty();
        };

        let mut entries = BTreeMap::new();
        for (ref_id, languages) in by_ref {
            let Some(languages) = languages.as_object() else {
                log_warning(format!("Ignoring translations for {}: not an object", ref_id));
                continue;
            };
            let resolved: BTreeMap<String, TranslationEntry> = languages
                .iter()
                .filter_map(|(lang, value)| {
                    TranslationEntry::from_value(ref_id, lang, value).map(|e| (lang.clone(), e))
                })
                .collect();
            if !resolved.is_empty() {
                entries.insert(ref_id.clone(), resolved);
            }
        }

        Self { entries }
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, ref_id: impl Into<String>, lang: impl Into<String>, entry: TranslationEntry) {
        self.entries
            .entry(ref_id.into())
            .or_default()
            .insert(lang.into(), entry);
    }

    /// Entry for a ref in a language, if any.
    pub fn get(&self, ref_id: &str, lang: &str) -> Option<&TranslationEntry> {
        self.entries.get(ref_id)?.get(lang)
    }

    /// Wording override for a ref in an optional language.
    ///
    /// `None` when no language is requested or no entry exists.
    pub fn resolve(&self, ref_id: &str, lang: Option<&str>) -> Option<WordingOverride> {
        let lang = lang.filter(|l| !l.is_empty())?;
        self.get(ref_id, lang).map(TranslationEntry::wording)
    }

    /// Languages a ref is translated into, sorted.
    pub fn languages_for(&self, ref_id: &str) -> Vec<&str> {
        self.entries
            .get(ref_id)
            .map(|langs| langs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All entries of a ref, keyed by language.
    pub fn entries_for(&self, ref_id: &str) -> Option<&BTreeMap<String, TranslationEntry>> {
        self.entries.get(ref_id)
    }

    /// Number of translated refs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
