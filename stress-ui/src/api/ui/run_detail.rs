//! Run detail page - files, environment metadata and output records

use axum::{
    extract::{Path, State},
    response::Html,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

use super::layout::{encode_path_segment, page, UiError};
use crate::api::blocking;
use crate::results::{is_malformed_record, OutputSummary, RunDir};
use crate::AppState;

/// Everything the detail page shows, read in one blocking pass
struct RunDetail {
    run: RunDir,
    files: Vec<String>,
    environment: Value,
    rows: Vec<Value>,
}

/// GET /view/:run_id
///
/// 404 page for an unknown run, 500 page if environment.json is malformed.
pub async fn run_detail_page(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Html<String>, UiError> {
    let store = state.store.clone();
    let detail = blocking(move || {
        let run = store.resolve_run(&run_id)?;
        Ok(RunDetail {
            files: run.list_files()?,
            environment: run.read_environment()?,
            rows: run.read_output()?,
            run,
        })
    })
    .await
    .map_err(|err| UiError::new(err, &state.settings.project_name))?;

    let content = render_detail(&detail);
    Ok(Html(page(&state.settings.project_name, detail.run.id(), &content)))
}

fn render_detail(detail: &RunDetail) -> String {
    let run_id = detail.run.id();
    let href = encode_path_segment(run_id);
    let href = encode_double_quoted_attribute(&href);
    let started = detail
        .run
        .started_at()
        .map(|t| format!(r#"<p class="muted">Started {}</p>"#, t.format("%Y-%m-%d %H:%M:%S")))
        .unwrap_or_default();

    let files: String = detail
        .files
        .iter()
        .map(|name| format!("            <li><code>{}</code></li>\n", encode_text(name)))
        .collect();

    let environment = serde_json::to_string_pretty(&detail.environment)
        .unwrap_or_else(|_| detail.environment.to_string());

    let summary = OutputSummary::from_rows(&detail.rows);

    format!(
        r#"        <h1>{name}</h1>
        {started}
        <p><a href="/runs/{href}/environment">environment JSON</a> · <a href="/runs/{href}/output">output JSON</a></p>

        <h2>Files</h2>
        <ul class="files">
{files}        </ul>

        <h2>Environment</h2>
        <pre class="json">{environment}</pre>

        <h2>Output</h2>
        <p class="summary">{total} records, {malformed} malformed</p>
{records}"#,
        name = encode_text(run_id),
        started = started,
        href = href,
        files = files,
        environment = encode_text(&environment),
        total = summary.total,
        malformed = summary.malformed,
        records = render_records(&detail.rows),
    )
}

/// Table with one column per top-level key of the object records
///
/// Malformed lines and non-object records span the whole row.
fn render_records(rows: &[Value]) -> String {
    if rows.is_empty() {
        return r#"        <p class="empty">output.jsonl has no records.</p>"#.to_string();
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in rows.iter().filter(|row| !is_malformed_record(row)) {
        if let Value::Object(obj) = row {
            for key in obj.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }
    let span = columns.len().max(1);

    let header: String = columns
        .iter()
        .map(|c| format!("<th>{}</th>", encode_text(c)))
        .collect();

    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = if is_malformed_record(row) {
                let raw = row.get("_raw").and_then(Value::as_str).unwrap_or_default();
                format!(
                    r#"<td colspan="{span}"><span class="badge">parse error</span> <code>{raw}</code></td>"#,
                    span = span,
                    raw = encode_text(raw),
                )
            } else if let Value::Object(obj) = row {
                columns
                    .iter()
                    .map(|c| format!("<td>{}</td>", obj.get(*c).map(cell_text).unwrap_or_default()))
                    .collect()
            } else {
                format!(r#"<td colspan="{}"><code>{}</code></td>"#, span, encode_text(&row.to_string()))
            };

            let class = if is_malformed_record(row) { r#" class="malformed""# } else { "" };
            format!("                <tr{}><td class=\"num\">{}</td>{}</tr>\n", class, i + 1, cells)
        })
        .collect();

    format!(
        r#"        <table class="records">
            <thead>
                <tr><th class="num">#</th>{header}</tr>
            </thead>
            <tbody>
{body}            </tbody>
        </table>"#,
        header = header,
        body = body,
    )
}

/// Strings are shown bare; everything else as compact JSON
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => encode_text(s).into_owned(),
        Value::Null => String::new(),
        other => format!("<code>{}</code>", encode_text(&other.to_string())),
    }
}
