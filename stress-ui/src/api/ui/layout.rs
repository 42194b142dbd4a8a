//! Shared HTML page shell, URL helpers and HTML error pages

use axum::response::{Html, IntoResponse, Response};
use html_escape::encode_text;

use crate::ApiError;

/// Wrap page content in the common document shell
pub fn page(project_name: &str, title: &str, content: &str) -> String {
    let project = encode_text(project_name);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {project}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header>
        <a class="brand" href="/">{project}</a>
    </header>
    <main>
{content}
    </main>
    <footer>stress-ui v{version}</footer>
</body>
</html>
"#,
        title = encode_text(title),
        project = project,
        content = content,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Percent-encode a single URL path segment
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Handler error rendered as an HTML page with the matching status code
#[derive(Debug)]
pub struct UiError {
    pub error: ApiError,
    /// Configured display name, so error pages match the other pages
    pub project_name: String,
}

impl UiError {
    pub fn new(error: ApiError, project_name: &str) -> Self {
        Self {
            error,
            project_name: project_name.to_string(),
        }
    }
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!("{}", self.error);
        }

        let heading = status.canonical_reason().unwrap_or("Error");
        let content = format!(
            r#"        <h1>{heading}</h1>
        <p class="error">{message}</p>
        <p><a href="/">Back to all runs</a></p>"#,
            heading = heading,
            message = encode_text(&self.error.message()),
        );

        (status, Html(page(&self.project_name, heading, &content))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_page_escapes_project_name_and_title() {
        let html = page("Tom & Jerry", "<run>", "");
        assert!(html.contains("<title>&lt;run&gt; - Tom &amp; Jerry</title>"));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("20240101_000000"), "20240101_000000");
        assert_eq!(encode_path_segment("run 1#a?b"), "run%201%23a%3Fb");
        assert_eq!(encode_path_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_ui_error_status() {
        let response =
            UiError::new(ApiError::NotFound("Run not found: x".into()), "Nightly").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
