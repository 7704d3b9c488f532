//! Loading the REF catalog and its translations.
//!
//! The catalog (`refs.json`) is required: an unreadable file, invalid JSON or
//! a document that does not match the catalog schema aborts the invocation
//! with a [`CatalogError`]. The translations file is optional: when it is
//! missing or unreadable the run continues with no translations.
//!
//! ```text
//! refs.json ──▶ JSON ──▶ schema check ──▶ Vec<RefRecord> ──▶ Catalog (id index)
//! translations.json ──▶ JSON? ──▶ Translations (empty on any failure)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{Group, RefRecord, Scalability, Translations};
use crate::validation::{self, ValidationReport, Violation};

/// On-disk shape of `refs.json`.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    refs: Vec<RefRecord>,
}

/// The REF catalog: records in file order plus an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RefRecord>,
    /// ref id -> position in `records`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from records.
    ///
    /// When an id occurs more than once the last record wins the lookup; the
    /// validator still reports the duplicates.
    pub fn from_records(records: Vec<RefRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.id().map(|id| (id.to_string(), i)))
            .collect();
        Self { records, index }
    }

    /// Parse a catalog document from a JSON string.
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_document(document)
    }

    /// Build a catalog from an already-parsed JSON document.
    pub fn from_document(document: Value) -> CatalogResult<Self> {
        if let Some(err) = validation::schema_error() {
            return Err(CatalogError::SchemaUnavailable(err.to_string()));
        }
        validation::validate_document(&document).map_err(CatalogError::Schema)?;

        let parsed: CatalogDocument = serde_json::from_value(document)?;
        Ok(Self::from_records(parsed.refs))
    }

    /// Load `refs.json` from disk.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        log_info(format!("📖 Loading catalog: {}", path.display()));

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;

        log_success(format!("Loaded {} REFs", catalog.len()));
        Ok(catalog)
    }

    /// Records in file order.
    pub fn records(&self) -> &[RefRecord] {
        &self.records
    }

    /// Look up a record by ref id.
    pub fn get(&self, ref_id: &str) -> Option<&RefRecord> {
        self.index.get(ref_id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, ref_id: &str) -> bool {
        self.index.contains_key(ref_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Run the record rules over the whole catalog.
    pub fn validate(&self) -> Result<usize, Vec<Violation>> {
        validation::validate_records(&self.records)
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_records(&self.records)
    }

    /// Records matching optional group and scalability filters, in file order.
    pub fn filter(&self, group: Option<Group>, scalability: Option<Scalability>) -> Vec<&RefRecord> {
        self.records
            .iter()
            .filter(|r| group.is_none() || r.group.as_ref().and_then(|g| g.known()) == group)
            .filter(|r| {
                scalability.is_none() || r.scalability.as_ref().and_then(|s| s.known()) == scalability
            })
            .collect()
    }

    /// Serialize back to the `refs.json` shape.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&CatalogDocument { refs: self.records.clone() })
    }
}

// =============================================================================
// Translations
// =============================================================================

/// Parse the translations document. Malformed JSON yields an error so the
/// caller can decide; [`load_translations`] degrades it to an empty set.
pub fn parse_translations(content: &str) -> serde_json::Result<Translations> {
    let document: Value = serde_json::from_str(content)?;
    Ok(Translations::from_document(&document))
}

/// Load `translations.json`, or no translations if it is absent or invalid.
pub fn load_translations(path: impl AsRef<Path>) -> Translations {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log_warning(format!("No translations loaded ({}: {})", path.display(), e));
            return Translations::empty();
        }
    };

    match parse_translations(&content) {
        Ok(translations) => {
            log_success(format!("Loaded translations for {} REFs", translations.len()));
            translations
        }
        Err(e) => {
            log_warning(format!("Ignoring invalid translations file {}: {}", path.display(), e));
            Translations::empty()
        }
    }
}
