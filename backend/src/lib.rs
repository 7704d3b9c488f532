//! # Refsheet - survey REF catalog validation and cheatsheet generation
//!
//! Refsheet keeps the catalog of survey-question definitions ("REFs") honest
//! and renders selected REFs as the fixed-column CSV the form generator
//! imports, optionally with translated wording.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  refs.json  │────▶│  Validator  │     │  Projector  │────▶│  CSV render │
//! │ (+ transl.) │────▶│  (report)   │     │ (+ wording) │     │ (16 cols)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use refsheet::{generate_cheatsheet, load_translations, Catalog, CheatsheetRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::load("data/refs.json")?;
//!     let translations = load_translations("data/translations.json");
//!     let request = CheatsheetRequest::new(["SAT_01"]).with_language("fr");
//!     print!("{}", generate_cheatsheet(&request, &catalog, &translations)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per layer
//! - [`models`] - REF records, vocabularies, translations
//! - [`catalog`] - Loading the catalog and translations
//! - [`validation`] - Document schema and record rules
//! - [`cheatsheet`] - Row projection, CSV rendering, pipeline
//! - [`parser`] - Catalog sheet import
//! - [`logs`] - Pipeline logging
//! - [`config`] - Data file locations

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod catalog;
pub mod config;

// Validation
pub mod validation;

// Cheatsheet
pub mod cheatsheet;

// Sheet import
pub mod parser;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CatalogError, ImportError, PipelineError, RenderError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Coded,
    Group,
    QuestionType,
    RefRecord,
    Scalability,
    Scale,
    TranslationEntry,
    Translations,
    TriState,
    Vocabulary,
    WordingOverride,
};

// =============================================================================
// Re-exports - Catalog
// =============================================================================

pub use catalog::{load_translations, parse_translations, Catalog};
pub use config::DataPaths;

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    validate_document,
    validate_records,
    ValidationReport,
    Violation,
};

// =============================================================================
// Re-exports - Cheatsheet
// =============================================================================

pub use cheatsheet::{
    build_rows,
    generate_cheatsheet,
    project_row,
    render_csv,
    CheatsheetRequest,
    CheatsheetRow,
    COLUMN_COUNT,
    HEADERS,
};

// =============================================================================
// Re-exports - Sheet import
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    import_bytes,
    import_sheet_file,
    parse_sheet,
    SheetImport,
};
