//! Browser UI
//!
//! The chat page is a single self-contained HTML document compiled into the
//! binary.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the chat page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
