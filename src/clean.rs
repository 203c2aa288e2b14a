use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::schema::{CellRecord, DATA_CELL, HeaderAxis};

/// Invisible or non-breaking spaces that model output leaks into cell text.
pub const INVISIBLE_SPACES: &[char] = &[
    '\u{2009}', // thin space
    '\u{200A}', // hair space
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{202F}', // narrow no-break space
    '\u{00A0}', // no-break space
];

/// Literal ` `-style spellings of [`INVISIBLE_SPACES`].
static ESCAPED_INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    let codes = INVISIBLE_SPACES
        .iter()
        .map(|ch| format!("{:04x}", u32::from(*ch)))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\\u(?:{codes})")).expect("hardcoded escape regex is valid")
});

static ESCAPED_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\+([()%])").expect("hardcoded punctuation regex is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded whitespace regex is valid"));

/// Strip escape artifacts, invisible spaces and underscores from cell text.
///
/// Idempotent: cleaning cleaned text changes nothing.
#[must_use]
pub fn clean_text(text: &str) -> String {
    // Underscores go first so removing one can never assemble an escape.
    let mut cleaned = text.replace('_', "");
    cleaned = ESCAPED_INVISIBLE.replace_all(&cleaned, " ").into_owned();
    cleaned = cleaned.replace(INVISIBLE_SPACES, " ");
    cleaned = ESCAPED_PUNCTUATION.replace_all(&cleaned, "$1").into_owned();
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub processed_cells: usize,
    pub changed_values: usize,
    pub skipped_values: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedValue {
    pub value: Value,
    pub changed: usize,
    pub skipped: usize,
}

/// Clean every string leaf under `value`.
///
/// Numbers and booleans are kept as they are and logged under `path`; a
/// stray non-text leaf never fails the batch.
#[must_use]
pub fn clean_value(value: &Value, path: &str) -> CleanedValue {
    let mut cleaned = CleanedValue {
        value: value.clone(),
        changed: 0,
        skipped: 0,
    };
    clean_leaves(&mut cleaned.value, path, &mut cleaned.changed, &mut cleaned.skipped);
    cleaned
}

fn clean_leaves(value: &mut Value, path: &str, changed: &mut usize, skipped: &mut usize) {
    match value {
        Value::String(text) => {
            let cleaned = clean_text(text);
            if cleaned != *text {
                *text = cleaned;
                *changed += 1;
            }
        }
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                clean_leaves(child, &format!("{path}.{key}"), changed, skipped);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                clean_leaves(child, &format!("{path}[{index}]"), changed, skipped);
            }
        }
        Value::Null => {}
        Value::Bool(_) | Value::Number(_) => {
            warn!(field = path, value = %value, "non-text value left unchanged");
            *skipped += 1;
        }
    }
}

/// Clean the content fields of every cell.
///
/// Touches `data cell` and each header level in either the scalar or the
/// `value`-wrapped layout. The identifying key is left alone since it drives
/// alignment.
#[must_use]
pub fn clean_cells(cells: &[CellRecord]) -> (Vec<CellRecord>, CleanReport) {
    let mut report = CleanReport::default();
    let mut cleaned_cells = Vec::with_capacity(cells.len());

    for (index, cell) in cells.iter().enumerate() {
        let mut cleaned_cell = cell.clone();

        if let Some(data) = cleaned_cell.get_mut(DATA_CELL) {
            apply(data, &format!("[{index}].{DATA_CELL}"), &mut report);
        }

        for axis in [HeaderAxis::Row, HeaderAxis::Column] {
            let Some(headers) = cleaned_cell.get_mut(axis.field()) else {
                continue;
            };
            match headers.as_object_mut() {
                Some(levels) => {
                    for level in axis.level_keys() {
                        if let Some(header) = levels.get_mut(level) {
                            apply(header, &format!("[{index}].{level}"), &mut report);
                        }
                    }
                }
                None => apply(headers, &format!("[{index}].{}", axis.field()), &mut report),
            }
        }

        cleaned_cells.push(cleaned_cell);
        report.processed_cells += 1;
    }

    (cleaned_cells, report)
}

fn apply(value: &mut Value, path: &str, report: &mut CleanReport) {
    clean_leaves(
        value,
        path,
        &mut report.changed_values,
        &mut report.skipped_values,
    );
}
