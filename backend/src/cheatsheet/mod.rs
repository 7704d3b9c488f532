//! Cheatsheet generation.
//!
//! This module turns catalog records into the form generator's CSV:
//! - Row: record + wording override to a 16-cell row
//! - Render: rows to a minimally quoted CSV document
//! - Pipeline: request lookup, translation resolution, rendering

pub mod pipeline;
pub mod render;
pub mod row;

pub use pipeline::{build_rows, generate_cheatsheet, CheatsheetRequest};
pub use render::render_csv;
pub use row::{project_row, CheatsheetRow, COLUMN_COUNT, HEADERS};
