//! `output.jsonl` record parsing

use serde_json::{json, Value};
use std::io::{BufRead, Read};

/// `_error` value carried by records whose line was not valid JSON
pub const PARSE_ERROR_MARKER: &str = "JSONDecodeError";

/// Parse newline-delimited JSON, one record per non-blank line
///
/// `\n`, `\r\n` and a bare `\r` all end a line. Lines are trimmed before
/// parsing. Malformed lines become sentinel records instead of errors; only
/// read failures (including invalid UTF-8) are returned as `Err`.
pub fn parse_output<R: BufRead>(mut reader: R) -> std::io::Result<Vec<Value>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut rows = Vec::new();
    for line in content.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = serde_json::from_str::<Value>(line).unwrap_or_else(|_| malformed_record(line));
        rows.push(row);
    }
    Ok(rows)
}

/// Sentinel standing in for a line that failed to parse
pub fn malformed_record(raw: &str) -> Value {
    json!({
        "_raw": raw,
        "_error": PARSE_ERROR_MARKER,
    })
}

/// True for records produced by [`malformed_record`]
pub fn is_malformed_record(row: &Value) -> bool {
    row.as_object().is_some_and(|obj| {
        obj.len() == 2
            && obj.get("_error").and_then(Value::as_str) == Some(PARSE_ERROR_MARKER)
            && obj.get("_raw").is_some_and(Value::is_string)
    })
}

/// Record counts shown on the run detail page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSummary {
    pub total: usize,
    pub malformed: usize,
}

impl OutputSummary {
    pub fn from_rows(rows: &[Value]) -> Self {
        Self {
            total: rows.len(),
            malformed: rows.iter().filter(|row| is_malformed_record(row)).count(),
        }
    }

    pub fn parsed(&self) -> usize {
        self.total - self.malformed
    }
}
