//! Catalog validation.
//!
//! Two layers:
//!
//! ## Document schema
//! [`validate_document`] checks the raw JSON against the embedded JSON Schema
//! (Draft 7, `schemas/refs-catalog.json`): an object with a `refs` array of
//! record objects. A failure here means the catalog cannot be loaded at all.
//! Field values of the wrong JSON type still load (see [`crate::models`]) and
//! are left to the record rules.
//!
//! ## Record rules
//! [`validate_records`] checks the loaded records and reports every problem
//! at once:
//!
//! - `ref` present, non-empty and unique (later duplicates are reported)
//! - `scalability` in `Standard`, `Custom`
//! - `group` in `Plan`, `User`, `Ancillary`
//! - `question` present (may be empty)
//! - `type`, when set, in `long_text`, `multiple_choice`, `opinion_scale`, `rating`
//!
//! # Example
//!
//! ```rust,ignore
//! use refsheet::{validate_records, RefRecord};
//!
//! let records = vec![RefRecord::new("A", "Hi"), RefRecord::new("A", "Again")];
//! let violations = validate_records(&records).unwrap_err();
//! assert!(violations
//!     .iter()
//!     .any(|v| v.to_string() == "Row 3 (A): duplicate ref \"A\""));
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use crate::models::{Coded, RefRecord, Vocabulary};

/// Rows in the catalog sheet start after a header line.
pub const FIRST_ROW: usize = 2;

static CATALOG_SCHEMA: Lazy<Result<jsonschema::Validator, String>> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/refs-catalog.json"))
        .map_err(|e| format!("schema is not JSON: {}", e))?;
    jsonschema::draft7::new(&schema).map_err(|e| e.to_string())
});

// =============================================================================
// Document schema
// =============================================================================

/// Validate a catalog document against the embedded schema.
///
/// # Returns
/// * `Ok(())` if the document has the catalog shape
/// * `Err(errors)` with one message per schema error
pub fn validate_document(document: &Value) -> Result<(), Vec<String>> {
    let validator = CATALOG_SCHEMA
        .as_ref()
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Compile error of the embedded schema, if any.
pub(crate) fn schema_error() -> Option<&'static str> {
    CATALOG_SCHEMA.as_ref().err().map(String::as_str)
}

// =============================================================================
// Record rules
// =============================================================================

/// One rule violation of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Sheet row of the record (`index + 2`).
    pub row: usize,
    /// Ref id of the record, when it has one.
    #[serde(rename = "ref")]
    pub ref_id: Option<String>,
    pub message: String,
}

impl Violation {
    fn new(index: usize, record: &RefRecord, message: impl Into<String>) -> Self {
        Self {
            row: index + FIRST_ROW,
            ref_id: record.id().map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ref_id {
            Some(id) => write!(f, "Row {} ({}): {}", self.row, id, self.message),
            None => write!(f, "Row {}: {}", self.row, self.message),
        }
    }
}

/// Outcome of a validation run, serializable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub checked: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn from_records(records: &[RefRecord]) -> Self {
        let violations = collect_violations(records);
        Self {
            valid: violations.is_empty(),
            checked: records.len(),
            violations,
        }
    }
}

/// Validate catalog records.
///
/// # Returns
/// * `Ok(count)` with the number of validated records
/// * `Err(violations)` in record order, several per record when it has
///   several problems
pub fn validate_records(records: &[RefRecord]) -> Result<usize, Vec<Violation>> {
    let violations = collect_violations(records);
    if violations.is_empty() {
        Ok(records.len())
    } else {
        Err(violations)
    }
}

fn collect_violations(records: &[RefRecord]) -> Vec<Violation> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut violations = Vec::new();

    for (i, record) in records.iter().enumerate() {
        match record.id() {
            None => violations.push(Violation::new(i, record, "missing ref")),
            Some(id) => {
                if !seen.insert(id) {
                    violations.push(Violation::new(i, record, format!("duplicate ref \"{}\"", id)));
                }
            }
        }

        if let Some(message) = check_required(record.scalability.as_ref(), "scalability") {
            violations.push(Violation::new(i, record, message));
        }
        if let Some(message) = check_required(record.group.as_ref(), "group") {
            violations.push(Violation::new(i, record, message));
        }
        if record.question.is_none() {
            violations.push(Violation::new(i, record, "missing question"));
        }
        if let Some(Coded::Unknown(value)) = &record.question_type {
            violations.push(Violation::new(i, record, format!("invalid type \"{}\"", value)));
        }
    }

    violations
}

/// Required vocabulary field: absent or empty is missing, anything else
/// outside the vocabulary is invalid.
fn check_required<T: Vocabulary>(value: Option<&Coded<T>>, field: &str) -> Option<String> {
    match value {
        None => Some(format!("missing {}", field)),
        Some(Coded::Unknown(s)) if s.is_empty() => Some(format!("missing {}", field)),
        Some(Coded::Unknown(s)) => Some(format!("invalid {} \"{}\"", field, s)),
        Some(Coded::Known(_)) => None,
    }
}
