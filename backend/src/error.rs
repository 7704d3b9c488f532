//! Error types for the refsheet pipeline.
//!
//! One error enum per layer:
//!
//! - [`CatalogError`] - loading the REF catalog (fatal for the invocation)
//! - [`RenderError`] - writing the cheatsheet CSV
//! - [`PipelineError`] - cheatsheet orchestration (unknown refs, rendering)
//! - [`ImportError`] - converting a spreadsheet export into a catalog
//!
//! Schema violations found by the validator are not errors: they are returned
//! as data (see [`crate::validation::Violation`]). A missing or malformed
//! translations file is not an error either.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Catalog Loading Errors
// =============================================================================

/// Errors while loading the REF catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog document does not match the catalog schema.
    #[error("Catalog does not match schema: {}", .0.join("; "))]
    Schema(Vec<String>),

    /// The embedded catalog schema could not be compiled.
    #[error("Embedded catalog schema is invalid: {0}")]
    SchemaUnavailable(String),
}

// =============================================================================
// Rendering Errors
// =============================================================================

/// Errors while writing the cheatsheet CSV.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The CSV writer rejected a record.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error("CSV buffer error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered bytes were not UTF-8.
    #[error("Rendered CSV is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Cheatsheet pipeline errors.
///
/// This is the error returned by [`crate::cheatsheet::generate_cheatsheet`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more requested refs are not in the catalog.
    ///
    /// Every unknown id of the request is listed, in request order.
    #[error("Unknown REF(s): {}", .0.join(", "))]
    UnknownRefs(Vec<String>),

    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// The unknown ref ids, if this is an unknown-ref failure.
    pub fn unknown_refs(&self) -> Option<&[String]> {
        match self {
            PipelineError::UnknownRefs(ids) => Some(ids),
            PipelineError::Render(_) => None,
        }
    }
}

// =============================================================================
// Import Errors
// =============================================================================

/// Errors while importing a catalog spreadsheet export.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to read the sheet file.
    #[error("Failed to read sheet: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader failed.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The sheet has no content at all.
    #[error("Sheet is empty")]
    EmptySheet,

    /// None of the columns is the `ref` column.
    #[error("No 'ref' column found in headers: {}", .0.join(", "))]
    MissingRefColumn(Vec<String>),

    /// The CSV reader only splits on single-byte (ASCII) delimiters.
    #[error("Unsupported delimiter {0:?}: must be an ASCII character")]
    InvalidDelimiter(char),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for the cheatsheet pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for sheet imports.
pub type ImportResult<T> = Result<T, ImportError>;
