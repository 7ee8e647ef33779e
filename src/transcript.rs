use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, UnitrackError};
use crate::models::TranscriptCourse;

/// Tables inside the per-term tab containers of a transcript export.
const TERM_TABLES: &str = r#"div[id^="tab"] table"#;
/// Status text of a passed course ("passed").
const PASSED_MARKER: &str = "قبول";
/// Stand-in for an empty code or name cell ("unknown").
pub const UNKNOWN: &str = "نامشخص";

/// An opening, closing or doctype tag such as `<td>`, `</tr>` or `<!DOCTYPE html>`.
const TAG_PATTERN: &str = r"<[!/]?[A-Za-z][^<>]*>";

const MIN_CELLS: usize = 5;
const CODE_CELL: usize = 0;
const NAME_CELL: usize = 1;
const STATUS_CELL: usize = 4;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| UnitrackError::Transcript(format!("bad selector {css}: {e}")))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>()
}

fn or_unknown(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        UNKNOWN.to_string()
    } else {
        text.to_string()
    }
}

/// True when the raw input contains at least one tag. The HTML parser accepts
/// anything, so plain text has to be caught before parsing.
fn has_markup(html: &str) -> Result<bool> {
    let tag = Regex::new(TAG_PATTERN)
        .map_err(|e| UnitrackError::Transcript(format!("bad tag pattern: {e}")))?;
    Ok(tag.is_match(html))
}

/// Extract passed courses from a transcript HTML document, in document order.
///
/// Rows with fewer than five cells or without the passed marker in the status
/// cell are ignored. Duplicates are kept.
pub fn parse_transcript(html: &str) -> Result<Vec<TranscriptCourse>> {
    if html.trim().is_empty() {
        return Err(UnitrackError::Transcript("document is empty".to_string()));
    }
    if !has_markup(html)? {
        return Err(UnitrackError::Transcript("document contains no markup".to_string()));
    }
    let doc = Html::parse_document(html);

    let tables = selector(TERM_TABLES)?;
    let rows = selector("tr")?;
    let cells = selector("td")?;

    let mut passed = Vec::new();
    for table in doc.select(&tables) {
        for row in table.select(&rows) {
            let row_cells: Vec<ElementRef> = row.select(&cells).collect();
            if row_cells.len() < MIN_CELLS {
                continue;
            }
            if !cell_text(&row_cells[STATUS_CELL]).contains(PASSED_MARKER) {
                continue;
            }
            passed.push(TranscriptCourse {
                code: or_unknown(&cell_text(&row_cells[CODE_CELL])),
                name: or_unknown(&cell_text(&row_cells[NAME_CELL])),
            });
        }
    }

    tracing::debug!(passed = passed.len(), "parsed transcript");
    Ok(passed)
}
