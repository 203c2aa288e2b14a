#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

pub fn write_document(dir: &Path, name: &str, cells: &Value) -> PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(cells).expect("fixture should serialize");
    std::fs::write(&path, text).expect("fixture should be written");
    path
}

/// Scalar-layout cell; `rows` and `cols` list header levels from level-1.
pub fn serial_cell(serial: &str, value: &str, rows: &[&str], cols: &[&str]) -> Value {
    json!({
        "serial_number": serial,
        "data cell": value,
        "row header": levels("row header", rows, |text| json!(text)),
        "column header": levels("column header", cols, |text| json!(text)),
    })
}

/// `value`-wrapped layout cell keyed by location.
pub fn location_cell(location: &str, value: &str, rows: &[&str], cols: &[&str]) -> Value {
    let wrap = |text: &str| json!({ "value": text });
    json!({
        "location": wrap(location),
        "data cell": wrap(value),
        "row header": levels("row header", rows, wrap),
        "column header": levels("column header", cols, wrap),
    })
}

fn levels(prefix: &str, texts: &[&str], leaf: impl Fn(&str) -> Value) -> Value {
    let map = texts
        .iter()
        .enumerate()
        .map(|(index, text)| (format!("{prefix} level-{}", index + 1), leaf(text)))
        .collect::<serde_json::Map<_, _>>();
    Value::Object(map)
}
