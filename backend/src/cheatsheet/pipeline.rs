//! Cheatsheet pipeline: requested ref ids to a CSV document.
//!
//! # Steps
//!
//! 1. Look up every requested id in the catalog, collecting unknown ids
//! 2. Stop with [`PipelineError::UnknownRefs`] if any id is unknown
//! 3. Resolve the wording override for the requested language
//! 4. Project each record into a row (request order, duplicates kept)
//! 5. Render header + rows
//!
//! # Example
//!
//! ```rust,ignore
//! use refsheet::{generate_cheatsheet, Catalog, CheatsheetRequest, Translations};
//!
//! let catalog = Catalog::load("data/refs.json")?;
//! let translations = refsheet::load_translations("data/translations.json");
//! let request = CheatsheetRequest::new(["SAT_01", "NPS"]).with_language("fr");
//! let csv = generate_cheatsheet(&request, &catalog, &translations)?;
//! ```

use serde::{Deserialize, Serialize};

use super::render::render_csv;
use super::row::{project_row, CheatsheetRow, HEADERS};
use crate::catalog::Catalog;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_success};
use crate::models::Translations;

/// What to put in the cheatsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatsheetRequest {
    /// Ref ids, in output order.
    pub refs: Vec<String>,
    /// Language code for translated wording; `None` uses catalog wording.
    #[serde(default)]
    pub language: Option<String>,
}

impl CheatsheetRequest {
    pub fn new<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            refs: refs.into_iter().map(Into::into).collect(),
            language: None,
        }
    }

    /// Set the language; a blank code means no language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into().trim().to_string();
        self.language = if language.is_empty() { None } else { Some(language) };
        self
    }
}

/// Project the requested refs into rows.
///
/// All-or-nothing: when any id is unknown no rows are returned and the error
/// lists every unknown id in request order.
pub fn build_rows(
    request: &CheatsheetRequest,
    catalog: &Catalog,
    translations: &Translations,
) -> PipelineResult<Vec<CheatsheetRow>> {
    let language = request.language.as_deref().filter(|l| !l.is_empty());

    let mut rows = Vec::with_capacity(request.refs.len());
    let mut missing = Vec::new();

    for ref_id in &request.refs {
        match catalog.get(ref_id) {
            Some(record) => {
                let wording = translations.resolve(ref_id, language);
                rows.push(project_row(record, wording.as_ref()));
            }
            None => missing.push(ref_id.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(PipelineError::UnknownRefs(missing));
    }
    Ok(rows)
}

/// Build the cheatsheet CSV for a request.
pub fn generate_cheatsheet(
    request: &CheatsheetRequest,
    catalog: &Catalog,
    translations: &Translations,
) -> PipelineResult<String> {
    log_info(format!(
        "🧾 Building cheatsheet for {} REF(s){}",
        request.refs.len(),
        request
            .language
            .as_deref()
            .map(|l| format!(" in '{}'", l))
            .unwrap_or_default()
    ));

    let rows = build_rows(request, catalog, translations)?;
    let csv = render_csv(&HEADERS, &rows)?;

    log_success(format!("{} rows rendered", rows.len()));
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RefRecord, TranslationEntry, WordingOverride};

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            RefRecord::new("A", "Alpha"),
            RefRecord::new("X", "Hi"),
            RefRecord {
                question_description: Some("desc".into()),
                ..RefRecord::new("D", "Described")
            },
        ])
    }

    fn data_lines(csv: &str) -> Vec<&str> {
        csv.lines().skip(1).collect()
    }

    #[test]
    fn test_rows_in_request_order_with_duplicates() {
        let request = CheatsheetRequest::new(["X", "A", "X"]);
        let rows = build_rows(&request, &catalog(), &Translations::empty()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r[3].as_str()).collect();
        assert_eq!(ids, vec!["X", "A", "X"]);
    }

    #[test]
    fn test_unknown_ids_all_reported() {
        let request = CheatsheetRequest::new(["A", "Z", "X", "Q"]);
        let err = build_rows(&request, &catalog(), &Translations::empty()).unwrap_err();
        assert_eq!(err.unknown_refs(), Some(&["Z".to_string(), "Q".to_string()][..]));
    }

    #[test]
    fn test_no_csv_when_any_id_unknown() {
        let request = CheatsheetRequest::new(["A", "Z"]);
        let result = generate_cheatsheet(&request, &catalog(), &Translations::empty());
        match result {
            Err(PipelineError::UnknownRefs(ids)) => assert_eq!(ids, vec!["Z"]),
            other => panic!("expected unknown refs, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_translation() {
        let mut translations = Translations::empty();
        translations.insert("X", "fr", TranslationEntry::Plain("Salut".into()));

        let request = CheatsheetRequest::new(["X"]).with_language("fr");
        let csv = generate_cheatsheet(&request, &catalog(), &translations).unwrap();
        assert_eq!(data_lines(&csv), vec![",,,X,Salut,,,,,,,,,,,"]);
    }

    #[test]
    fn test_structured_translation_description_only() {
        let mut translations = Translations::empty();
        translations.insert(
            "X",
            "fr",
            TranslationEntry::Structured(WordingOverride {
                question: None,
                question_description: Some("D".into()),
            }),
        );

        let request = CheatsheetRequest::new(["X"]).with_language("fr");
        let rows = build_rows(&request, &catalog(), &translations).unwrap();
        assert_eq!(rows[0][4], "Hi");
        assert_eq!(rows[0][5], "D");
    }

    #[test]
    fn test_other_language_falls_back() {
        let mut translations = Translations::empty();
        translations.insert("D", "fr", TranslationEntry::Plain("Décrit".into()));

        let request = CheatsheetRequest::new(["D"]).with_language("de");
        let rows = build_rows(&request, &catalog(), &translations).unwrap();
        assert_eq!(rows[0][4], "Described");
        assert_eq!(rows[0][5], "desc");
    }

    #[test]
    fn test_no_language_ignores_translations() {
        let mut translations = Translations::empty();
        translations.insert("A", "fr", TranslationEntry::Plain("Alpha FR".into()));

        let rows = build_rows(&CheatsheetRequest::new(["A"]), &catalog(), &translations).unwrap();
        assert_eq!(rows[0][4], "Alpha");
    }

    #[test]
    fn test_blank_language_is_none() {
        assert_eq!(CheatsheetRequest::new(["A"]).with_language("  ").language, None);
        assert_eq!(
            CheatsheetRequest::new(["A"]).with_language(" fr ").language.as_deref(),
            Some("fr")
        );
    }

    #[test]
    fn test_empty_request_is_header_only() {
        let csv = generate_cheatsheet(&CheatsheetRequest::default(), &catalog(), &Translations::empty()).unwrap();
        assert!(csv.starts_with("Scalability,Group,Comment,ref,"));
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_sample_data_french_cheatsheet() {
        let catalog = Catalog::from_json_str(include_str!("../../../data/refs.json")).unwrap();
        let translations =
            crate::catalog::parse_translations(include_str!("../../../data/translations.json")).unwrap();
        assert_eq!(catalog.validate(), Ok(3));

        let request = CheatsheetRequest::new(["SAT_OVERALL", "PLAN_CHANNELS"]).with_language("fr");
        let rows = build_rows(&request, &catalog, &translations).unwrap();

        assert_eq!(rows[0][4], "Dans l'ensemble, êtes-vous satisfait du service ?");
        assert_eq!(rows[0][7], "10");
        assert_eq!(rows[0][8], "FALSE");
        assert_eq!(rows[1][4], "Which channels did you use to contact us?");
        assert_eq!(rows[1][12], "TRUE");
        assert_eq!(rows[1][14], "Phone;Email;Chat;In person");
    }

    #[test]
    fn test_translations_without_wrapper_key_are_not_used() {
        let translations = crate::catalog::parse_translations(r#"{ "X": { "fr": "Salut" } }"#).unwrap();
        let request = CheatsheetRequest::new(["X"]).with_language("fr");
        let csv = generate_cheatsheet(&request, &catalog(), &translations).unwrap();
        assert_eq!(data_lines(&csv), vec![",,,X,Hi,,,,,,,,,,,"]);
    }

    #[test]
    fn test_roundtrip_with_special_characters() {
        let record = RefRecord {
            comment: Some("a, b".into()),
            question_description: Some("line one\nline \"two\"".into()),
            choices: Some("Yes;No".into()),
            ..RefRecord::new("S", "Why, \"really\"?")
        };
        let catalog = Catalog::from_records(vec![record.clone()]);
        let csv = generate_cheatsheet(&CheatsheetRequest::new(["S"]), &catalog, &Translations::empty()).unwrap();

        let mut reader = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, HEADERS.map(String::from).to_vec());

        let parsed: Vec<String> = reader.records().next().unwrap().unwrap().iter().map(String::from).collect();
        assert_eq!(parsed, project_row(&record, None).to_vec());
    }
}
