//! Catalog sheet import with encoding and delimiter auto-detection.
//!
//! The catalog is maintained as a spreadsheet whose columns are the
//! cheatsheet columns. This module reads a CSV export of that sheet back into
//! [`RefRecord`]s so it can be written as `refs.json`.
//!
//! Cell conversion:
//! - empty cell → field absent
//! - `TRUE` / `FALSE` (any case) → tri-state flag, anything else unset
//! - numeric `scale` → number, otherwise text
//! - `Scalability`, `Group`, `type` → kept verbatim, valid or not, so the
//!   validator can report bad values with their sheet row

use csv::ReaderBuilder;
use std::path::Path;

use crate::cheatsheet::row::{COLUMN_COUNT, HEADERS};
use crate::error::{ImportError, ImportResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{Coded, RefRecord, Scale, TriState};

/// Record field names, in [`HEADERS`] order.
const FIELD_NAMES: [&str; COLUMN_COUNT] = [
    "scalability",
    "group",
    "comment",
    "ref",
    "question",
    "question_description",
    "type",
    "scale",
    "start_at_one",
    "left_label",
    "center_label",
    "right_label",
    "allow_multiple_selection",
    "allow_other_choice",
    "choices",
    "randomized",
];

/// Result of importing a sheet, with detection metadata
#[derive(Debug, Clone)]
pub struct SheetImport {
    pub records: Vec<RefRecord>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
    /// Column headers as found in the sheet
    pub headers: Vec<String>,
    /// Headers that match no catalog field
    pub ignored_columns: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings and invalid UTF-8 fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };
    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Catalog field index for a sheet header.
///
/// Matches the cheatsheet header or the JSON field name, ignoring case and
/// surrounding whitespace.
fn field_for_header(header: &str) -> Option<usize> {
    let normalized = header.trim().to_lowercase();
    (0..COLUMN_COUNT).find(|&i| {
        normalized == HEADERS[i].to_lowercase() || normalized == FIELD_NAMES[i]
    })
}

fn non_empty(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

fn set_field(record: &mut RefRecord, field: usize, cell: &str) {
    let trimmed = cell.trim();
    match FIELD_NAMES[field] {
        "scalability" => record.scalability = non_empty(trimmed).map(|s| Coded::from_text(&s)),
        "group" => record.group = non_empty(trimmed).map(|s| Coded::from_text(&s)),
        "comment" => record.comment = non_empty(cell),
        "ref" => record.ref_id = non_empty(trimmed),
        "question" => record.question = non_empty(cell),
        "question_description" => record.question_description = non_empty(cell),
        "type" => record.question_type = non_empty(trimmed).map(|s| Coded::from_text(&s)),
        "scale" => record.scale = non_empty(trimmed).map(|s| Scale::from_text(&s)),
        "start_at_one" => record.start_at_one = TriState::from_cell(cell),
        "left_label" => record.left_label = non_empty(cell),
        "center_label" => record.center_label = non_empty(cell),
        "right_label" => record.right_label = non_empty(cell),
        "allow_multiple_selection" => record.allow_multiple_selection = TriState::from_cell(cell),
        "allow_other_choice" => record.allow_other_choice = TriState::from_cell(cell),
        "choices" => record.choices = non_empty(cell),
        "randomized" => record.randomized = TriState::from_cell(cell),
        _ => {}
    }
}

/// Parse decoded sheet content with an explicit delimiter.
pub fn parse_sheet(content: &str, delimiter: char) -> ImportResult<Vec<RefRecord>> {
    parse_sheet_with_metadata(content, delimiter, "utf-8".to_string()).map(|s| s.records)
}

fn parse_sheet_with_metadata(content: &str, delimiter: char, encoding: String) -> ImportResult<SheetImport> {
    if !delimiter.is_ascii() {
        return Err(ImportError::InvalidDelimiter(delimiter));
    }
    if content.trim().is_empty() {
        return Err(ImportError::EmptySheet);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mapping: Vec<Option<usize>> = headers.iter().map(|h| field_for_header(h)).collect();

    if !mapping.iter().any(|m| *m == Some(3)) {
        return Err(ImportError::MissingRefColumn(headers));
    }

    let ignored_columns: Vec<String> = headers
        .iter()
        .zip(&mapping)
        .filter(|(h, m)| m.is_none() && !h.is_empty())
        .map(|(h, _)| h.clone())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut record = RefRecord::default();
        for (cell, field) in row.iter().zip(&mapping) {
            if let Some(field) = field {
                set_field(&mut record, *field, cell);
            }
        }
        records.push(record);
    }

    Ok(SheetImport {
        records,
        encoding,
        delimiter,
        headers,
        ignored_columns,
    })
}

/// Import sheet bytes with auto-detection of encoding and delimiter.
pub fn import_bytes(bytes: &[u8]) -> ImportResult<SheetImport> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let import = parse_sheet_with_metadata(&content, delimiter, encoding)?;

    log_success(format!("Detected encoding: {}", import.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(import.delimiter)));
    if !import.ignored_columns.is_empty() {
        log_warning(format!("Ignored columns: {}", import.ignored_columns.join(", ")));
    }
    log_success(format!("Read {} REF rows", import.records.len()));
    Ok(import)
}

/// Import a sheet file with auto-detection of encoding and delimiter.
pub fn import_sheet_file(path: impl AsRef<Path>) -> ImportResult<SheetImport> {
    let path = path.as_ref();
    log_info(format!("📖 Reading sheet: {}", path.display()));
    let bytes = std::fs::read(path)?;
    import_bytes(&bytes)
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::cheatsheet::{generate_cheatsheet, CheatsheetRequest};
    use crate::models::{Group, QuestionType, Scalability, Translations};

    #[test]
    fn test_parse_cheatsheet_layout() {
        let sheet = "Scalability,Group,Comment,ref,question,question description,type,scale,start_at_one,left_label,center_label,right_label,allow_multiple_selection,allow_other_choice,\"choices (separated by \"\";\"\")\",randomized\n\
                     Standard,User,,SAT_01,\"How satisfied, overall?\",,opinion_scale,10,TRUE,Low,,High,,,,false\n";
        let records = parse_sheet(sheet, ',').unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id(), Some("SAT_01"));
        assert_eq!(r.scalability, Some(Coded::Known(Scalability::Standard)));
        assert_eq!(r.group, Some(Coded::Known(Group::User)));
        assert_eq!(r.question.as_deref(), Some("How satisfied, overall?"));
        assert_eq!(r.question_type, Some(Coded::Known(QuestionType::OpinionScale)));
        assert!(matches!(r.scale, Some(Scale::Number(_))));
        assert_eq!(r.start_at_one, TriState::True);
        assert_eq!(r.randomized, TriState::False);
        assert_eq!(r.allow_other_choice, TriState::Unset);
        assert_eq!(r.comment, None);
        assert_eq!(r.right_label.as_deref(), Some("High"));
    }

    #[test]
    fn test_field_name_headers_and_semicolons() {
        let sheet = "ref;question;type;Notes\nA;Hi;slider;internal\n;;;\nB;Bye;;\n";
        let records = parse_sheet(sheet, ';').unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question_type, Some(Coded::Unknown("slider".into())));
        assert_eq!(records[1].question_type, None);
    }

    #[test]
    fn test_missing_ref_column() {
        let err = parse_sheet("question,type\nHi,rating\n", ',').unwrap_err();
        assert!(matches!(err, ImportError::MissingRefColumn(_)));
        assert!(matches!(parse_sheet("  \n", ','), Err(ImportError::EmptySheet)));
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let err = parse_sheet("ref§question\nA§Hi\n", '§').unwrap_err();
        assert!(matches!(err, ImportError::InvalidDelimiter('§')));
        assert!(err.to_string().contains("ASCII"));
    }

    #[test]
    fn test_import_bytes_detects_layout() {
        let sheet = "ref\tquestion\tExtra\nA\tHi\tx\n";
        let import = import_bytes(sheet.as_bytes()).unwrap();
        assert_eq!(import.delimiter, '\t');
        assert_eq!(import.ignored_columns, vec!["Extra"]);
        assert_eq!(import.records[0].question.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"ref,question\nA,Hi\n");
        let import = import_bytes(&bytes).unwrap();
        assert_eq!(import.headers[0], "ref");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        assert_eq!(decode_content(bytes, "iso-8859-1"), "Société");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a|b|c"), '|');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_cheatsheet_output_imports_back() {
        let original = Catalog::from_json_str(
            r#"{ "refs": [
                { "ref": "A", "scalability": "Custom", "group": "Plan", "question": "Say \"hi\", please",
                  "question_description": "two\nlines", "type": "multiple_choice", "choices": "X;Y",
                  "allow_multiple_selection": true, "randomized": false, "scale": 3 }
            ] }"#,
        )
        .unwrap();

        let csv = generate_cheatsheet(&CheatsheetRequest::new(["A"]), &original, &Translations::empty()).unwrap();
        let imported = parse_sheet(&csv, detect_delimiter(&csv)).unwrap();

        assert_eq!(imported, original.records().to_vec());
    }
}
