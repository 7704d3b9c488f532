//! Row projection: one REF record to one cheatsheet row.
//!
//! The column order is fixed by the form generator and must not change.

use crate::models::{RefRecord, WordingOverride};

/// Number of cheatsheet columns.
pub const COLUMN_COUNT: usize = 16;

/// Cheatsheet header, in form-generator order.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Scalability",
    "Group",
    "Comment",
    "ref",
    "question",
    "question description",
    "type",
    "scale",
    "start_at_one",
    "left_label",
    "center_label",
    "right_label",
    "allow_multiple_selection",
    "allow_other_choice",
    "choices (separated by \";\")",
    "randomized",
];

/// One projected row, cells in [`HEADERS`] order.
pub type CheatsheetRow = [String; COLUMN_COUNT];

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Project a record into a cheatsheet row.
///
/// `wording` replaces the question and/or description where it carries a
/// value; every other cell comes from the record.
pub fn project_row(record: &RefRecord, wording: Option<&WordingOverride>) -> CheatsheetRow {
    let question = wording
        .and_then(|w| w.question.clone())
        .or_else(|| record.question.clone())
        .unwrap_or_default();
    let description = wording
        .and_then(|w| w.question_description.clone())
        .or_else(|| record.question_description.clone())
        .unwrap_or_default();

    [
        record.scalability.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
        record.group.as_ref().map(|g| g.as_str().to_string()).unwrap_or_default(),
        text(&record.comment),
        text(&record.ref_id),
        question,
        description,
        record.question_type.as_ref().map(|t| t.as_str().to_string()).unwrap_or_default(),
        record.scale.as_ref().map(ToString::to_string).unwrap_or_default(),
        record.start_at_one.as_cell().to_string(),
        text(&record.left_label),
        text(&record.center_label),
        text(&record.right_label),
        record.allow_multiple_selection.as_cell().to_string(),
        record.allow_other_choice.as_cell().to_string(),
        text(&record.choices),
        record.randomized.as_cell().to_string(),
    ]
}
