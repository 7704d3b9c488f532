//! CSV rendering with minimal quoting.
//!
//! A cell is quoted only when it contains a comma, a double quote, `\n` or
//! `\r`; quotes inside a quoted cell are doubled. Lines are joined with `\n`
//! and the document has no trailing line terminator.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::RenderResult;

/// Render a header and rows as one CSV document.
pub fn render_csv<H, R, C>(headers: &[H], rows: R) -> RenderResult<String>
where
    H: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers.iter().map(|h| h.as_ref().as_bytes()))?;
    for row in rows {
        writer.write_record(row.into_iter().map(|cell| cell.as_ref().to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut document = String::from_utf8(bytes)?;
    if document.ends_with('\n') {
        document.pop();
    }
    Ok(document)
}
