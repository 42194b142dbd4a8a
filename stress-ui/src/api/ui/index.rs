//! Index page - list of all runs, newest first

use axum::{extract::State, response::Html};
use html_escape::{encode_double_quoted_attribute, encode_text};

use super::layout::{encode_path_segment, page, UiError};
use crate::api::blocking;
use crate::results::run_started_at;
use crate::AppState;

/// GET /
pub async fn index_page(State(state): State<AppState>) -> Result<Html<String>, UiError> {
    let store = state.store.clone();
    let runs = blocking(move || store.list_runs())
        .await
        .map_err(|err| UiError::new(err, &state.settings.project_name))?;

    let content = if runs.is_empty() {
        format!(
            r#"        <h1>Runs</h1>
        <p class="empty">No runs found in <code>{}</code>.</p>"#,
            encode_text(&state.store.root().display().to_string())
        )
    } else {
        let rows: String = runs.iter().map(|run_id| run_row(run_id)).collect();
        format!(
            r#"        <h1>Runs <span class="count">({count})</span></h1>
        <table class="runs">
            <thead>
                <tr><th>Run</th><th>Started</th><th>Data</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>"#,
            count = runs.len(),
            rows = rows,
        )
    };

    Ok(Html(page(&state.settings.project_name, "Runs", &content)))
}

fn run_row(run_id: &str) -> String {
    let href = encode_path_segment(run_id);
    let href = encode_double_quoted_attribute(&href);
    let started = run_started_at(run_id)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    format!(
        r#"                <tr>
                    <td><a href="/view/{href}">{name}</a></td>
                    <td>{started}</td>
                    <td><a href="/runs/{href}/environment">environment</a> · <a href="/runs/{href}/output">output</a></td>
                </tr>
"#,
        href = href,
        name = encode_text(run_id),
        started = started,
    )
}
