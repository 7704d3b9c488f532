//! Domain models for the REF catalog.
//!
//! - [`RefRecord`] - One survey-question definition
//! - [`Scalability`], [`Group`], [`QuestionType`] - Fixed vocabularies
//! - [`Coded`] - An enum-typed field that keeps out-of-vocabulary values
//! - [`Scale`] - Numeric or free-text question parameter
//! - [`TriState`] - `true` / `false` / unset flag
//! - [`translation`] - Per-language wording overrides

pub mod translation;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

pub use translation::{TranslationEntry, Translations, WordingOverride};

// =============================================================================
// Vocabularies
// =============================================================================

/// Whether a question is part of the standard set or tailored per survey.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Scalability {
    Standard,
    Custom,
}

/// Audience group a question belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Group {
    Plan,
    User,
    Ancillary,
}

/// Question type understood by the form generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    LongText,
    MultipleChoice,
    OpinionScale,
    Rating,
}

/// Name of a vocabulary value as it appears in the catalog and the CSV.
pub trait Vocabulary: Sized + Copy + 'static {
    /// All values, in declaration order.
    const ALL: &'static [Self];

    /// Catalog spelling.
    fn as_str(&self) -> &'static str;

    /// Exact (case-sensitive) lookup by catalog spelling.
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl Vocabulary for Scalability {
    const ALL: &'static [Self] = &[Self::Standard, Self::Custom];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Custom => "Custom",
        }
    }
}

impl Vocabulary for Group {
    const ALL: &'static [Self] = &[Self::Plan, Self::User, Self::Ancillary];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "Plan",
            Self::User => "User",
            Self::Ancillary => "Ancillary",
        }
    }
}

impl Vocabulary for QuestionType {
    const ALL: &'static [Self] = &[
        Self::LongText,
        Self::MultipleChoice,
        Self::OpinionScale,
        Self::Rating,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::LongText => "long_text",
            Self::MultipleChoice => "multiple_choice",
            Self::OpinionScale => "opinion_scale",
            Self::Rating => "rating",
        }
    }
}

// =============================================================================
// Coded field
// =============================================================================

/// A vocabulary-typed field as found in the catalog.
///
/// Catalog data is hand-edited, so a value outside the vocabulary must load
/// and be reported by the validator rather than abort deserialization. Any
/// non-string JSON value is kept as its text (`5` becomes `Unknown("5")`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Coded<T> {
    /// A value from the vocabulary.
    Known(T),
    /// Anything else, verbatim.
    Unknown(String),
}

impl<T: Vocabulary> Coded<T> {
    /// Build from catalog text, falling back to [`Coded::Unknown`].
    pub fn from_text(s: &str) -> Self {
        match T::parse(s) {
            Some(v) => Coded::Known(v),
            None => Coded::Unknown(s.to_string()),
        }
    }

    /// Text written to the cheatsheet cell.
    pub fn as_str(&self) -> &str {
        match self {
            Coded::Known(v) => v.as_str(),
            Coded::Unknown(s) => s,
        }
    }

    /// The vocabulary value, if valid.
    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(v) => Some(*v),
            Coded::Unknown(_) => None,
        }
    }
}

impl<'de, T: Vocabulary> Deserialize<'de> for Coded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Coded::from_text(&value_text(&value)))
    }
}

// =============================================================================
// Scale
// =============================================================================

/// Question-type-specific parameter (e.g. `5` for a rating, `"0-10"` as text).
///
/// A number stays a number; any other JSON value is kept as its text.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Scale {
    Number(Number),
    Text(String),
}

impl Scale {
    /// Parse a sheet cell: numbers become [`Scale::Number`].
    pub fn from_text(s: &str) -> Self {
        match serde_json::from_str::<Number>(s.trim()) {
            Ok(n) => Scale::Number(n),
            Err(_) => Scale::Text(s.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Scale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Scale::Number(n),
            other => Scale::Text(value_text(&other)),
        })
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Text(s) => f.write_str(s),
            Scale::Number(n) => f.write_str(&number_text(n)),
        }
    }
}

// =============================================================================
// Lenient field reading
// =============================================================================

/// Text of a JSON value as it appears in a cell or a violation message.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        // 5.0 prints as "5", the way the form generator's tooling does
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => (v as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Text field: `null` is unset, any other value is kept as its text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

// =============================================================================
// Tri-state flag
// =============================================================================

/// A boolean that may be left unset.
///
/// Only `true` and `false` are set; `null`, a missing key or any other value
/// is unset.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(into = "Option<bool>")]
pub enum TriState {
    True,
    False,
    #[default]
    Unset,
}

impl TriState {
    /// Cheatsheet cell: `TRUE`, `FALSE` or empty.
    pub fn as_cell(&self) -> &'static str {
        match self {
            TriState::True => "TRUE",
            TriState::False => "FALSE",
            TriState::Unset => "",
        }
    }

    /// Parse a sheet cell (case-insensitive `TRUE` / `FALSE`, anything else unset).
    pub fn from_cell(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRUE" => TriState::True,
            "FALSE" => TriState::False,
            _ => TriState::Unset,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, TriState::Unset)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(TriState::from(Value::deserialize(deserializer)?.as_bool()))
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::True,
            Some(false) => TriState::False,
            None => TriState::Unset,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        match value {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unset => None,
        }
    }
}

// =============================================================================
// REF record
// =============================================================================

/// One survey-question definition of the catalog.
///
/// Every field is optional at the type level: presence rules are enforced by
/// [`crate::validation::validate_records`], not by deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RefRecord {
    /// Unique identifier.
    #[serde(rename = "ref", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalability: Option<Coded<Scalability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Coded<Group>>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Default (English) wording.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub question_description: Option<String>,
    /// `None` means unspecified.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<Coded<QuestionType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub start_at_one: TriState,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub left_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub center_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub right_label: Option<String>,
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub allow_multiple_selection: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub allow_other_choice: TriState,
    /// Semicolon-separated choice list.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub choices: Option<String>,
    #[serde(default, skip_serializing_if = "TriState::is_unset")]
    pub randomized: TriState,
}

impl RefRecord {
    /// Create a record with just an id and its question.
    pub fn new(ref_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            ref_id: Some(ref_id.into()),
            question: Some(question.into()),
            ..Self::default()
        }
    }

    /// The ref id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.ref_id.as_deref().filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_deserialization() {
        let record: RefRecord = serde_json::from_value(json!({
            "ref": "SAT_01",
            "scalability": "Standard",
            "group": "User",
            "question": "How satisfied are you?",
            "type": "opinion_scale",
            "scale": 10,
            "start_at_one": true,
            "randomized": null
        }))
        .unwrap();

        assert_eq!(record.id(), Some("SAT_01"));
        assert_eq!(record.scalability, Some(Coded::Known(Scalability::Standard)));
        assert_eq!(record.group, Some(Coded::Known(Group::User)));
        assert_eq!(record.question_type, Some(Coded::Known(QuestionType::OpinionScale)));
        assert_eq!(record.start_at_one, TriState::True);
        assert_eq!(record.randomized, TriState::Unset);
        assert_eq!(record.allow_other_choice, TriState::Unset);
    }

    #[test]
    fn test_unknown_vocabulary_values_are_kept() {
        let record: RefRecord = serde_json::from_value(json!({
            "ref": "X",
            "scalability": "Bespoke",
            "type": "slider"
        }))
        .unwrap();

        assert_eq!(record.scalability, Some(Coded::Unknown("Bespoke".into())));
        assert_eq!(record.question_type.as_ref().map(Coded::as_str), Some("slider"));
        assert!(record.question_type.and_then(|t| t.known()).is_none());
    }

    #[test]
    fn test_empty_ref_is_not_an_id() {
        let record = RefRecord { ref_id: Some(String::new()), ..RefRecord::default() };
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_tristate_cells() {
        assert_eq!(TriState::True.as_cell(), "TRUE");
        assert_eq!(TriState::False.as_cell(), "FALSE");
        assert_eq!(TriState::Unset.as_cell(), "");
        assert_eq!(TriState::from_cell(" true "), TriState::True);
        assert_eq!(TriState::from_cell("False"), TriState::False);
        assert_eq!(TriState::from_cell(""), TriState::Unset);
    }

    #[test]
    fn test_scale_display() {
        let int: Scale = serde_json::from_value(json!(5)).unwrap();
        let whole_float: Scale = serde_json::from_value(json!(5.0)).unwrap();
        let frac: Scale = serde_json::from_value(json!(2.5)).unwrap();
        let text: Scale = serde_json::from_value(json!("0-10")).unwrap();

        assert_eq!(int.to_string(), "5");
        assert_eq!(whole_float.to_string(), "5");
        assert_eq!(frac.to_string(), "2.5");
        assert_eq!(text.to_string(), "0-10");
    }

    #[test]
    fn test_scale_from_text() {
        assert!(matches!(Scale::from_text("7"), Scale::Number(_)));
        assert!(matches!(Scale::from_text("1 to 7"), Scale::Text(_)));
    }

    #[test]
    fn test_serialization_skips_unset_fields() {
        let record = RefRecord::new("A", "Hi");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "ref": "A", "question": "Hi" }));
    }

    #[test]
    fn test_wrongly_typed_fields_load_as_text() {
        let record: RefRecord = serde_json::from_value(json!({
            "ref": 12,
            "scalability": 5,
            "group": ["Plan"],
            "question": 42,
            "scale": true,
            "start_at_one": "yes",
            "randomized": false
        }))
        .unwrap();

        assert_eq!(record.id(), Some("12"));
        assert_eq!(record.scalability, Some(Coded::Unknown("5".into())));
        assert_eq!(record.group, Some(Coded::Unknown("[\"Plan\"]".into())));
        assert_eq!(record.question.as_deref(), Some("42"));
        assert_eq!(record.scale, Some(Scale::Text("true".into())));
        assert_eq!(record.start_at_one, TriState::Unset);
        assert_eq!(record.randomized, TriState::False);
    }

    #[test]
    fn test_null_fields_are_unset() {
        let record: RefRecord = serde_json::from_value(json!({
            "ref": "A",
            "group": null,
            "question": null,
            "scale": null
        }))
        .unwrap();

        assert_eq!(record.group, None);
        assert_eq!(record.question, None);
        assert_eq!(record.scale, None);
    }
}
