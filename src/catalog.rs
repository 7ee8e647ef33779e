use regex::Regex;

use crate::models::{Course, CourseGroup};
use crate::numerals::{is_digit, parse_units};

// Catalog text layout: the header row names one group per three columns
// ("<group name> - <required units>", then two unused cells). Every row after
// that carries one course per group in the same three columns:
// name, code, units.
const COLUMNS_PER_GROUP: usize = 3;
const HEADER_SEPARATOR: &str = " - ";
/// First run of Latin or Persian digits in a group header.
const UNITS_PATTERN: &str = r"[0-9\x{06F0}-\x{06F9}]+";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_text(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != '\r' && *c != '"').collect();
    cleaned
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_group_header(field: &str, units: Option<&Regex>) -> Option<CourseGroup> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    let (name, rest) = field.split_once(HEADER_SEPARATOR)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let required_units = units
        .and_then(|re| re.find(rest))
        .map(|m| parse_units(m.as_str()))
        .unwrap_or(0);
    Some(CourseGroup::new(name, required_units))
}

fn parse_course(record: &csv::StringRecord, group_index: usize) -> Option<Course> {
    let start = group_index * COLUMNS_PER_GROUP;
    if start + 2 >= record.len() {
        return None;
    }
    let name = record[start].trim();
    let code = record[start + 1].trim();
    if name.is_empty() || code.is_empty() {
        return None;
    }
    let units_text: String = record[start + 2].chars().filter(|c| is_digit(*c)).collect();
    Some(Course::new(name, code, parse_units(&units_text)))
}

// ---------------------------------------------------------------------------
// Catalog parser
// ---------------------------------------------------------------------------

/// Parse catalog text into course groups.
///
/// Malformed header triples, short rows and rows missing a name or code are
/// skipped. Groups that end up with no courses are dropped, so unusable input
/// gives an empty vector rather than an error.
pub fn parse_catalog(text: &str) -> Vec<CourseGroup> {
    let table = normalize_text(text);
    if table.is_empty() {
        return Vec::new();
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(table.as_bytes());
    let mut records = rdr.records();

    let Some(Ok(header)) = records.next() else {
        return Vec::new();
    };
    let units = Regex::new(UNITS_PATTERN).ok();
    let mut groups: Vec<CourseGroup> = header
        .iter()
        .step_by(COLUMNS_PER_GROUP)
        .filter_map(|field| parse_group_header(field, units.as_ref()))
        .collect();

    let mut rows = 0usize;
    for result in records {
        let Ok(record) = result else { continue };
        rows += 1;
        for (group_index, group) in groups.iter_mut().enumerate() {
            if let Some(course) = parse_course(&record, group_index) {
                group.courses.push(course);
            }
        }
    }

    let declared = groups.len();
    groups.retain(|g| !g.courses.is_empty());
    tracing::debug!(
        declared,
        kept = groups.len(),
        rows,
        "parsed catalog"
    );
    groups
}
