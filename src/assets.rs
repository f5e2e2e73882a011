//! Embedded framework assets.
//!
//! The default stylesheet and the live-reload client are compiled into the
//! binary and served under `/static/`, independent of the content directory.

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

/// Default page stylesheet.
pub const STYLE_CSS: &str = include_str!("../static/style.css");

/// Browser-side live-reload client.
pub const LIVERELOAD_JS: &str = include_str!("../static/livereload.js");

pub async fn style_css() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

pub async fn livereload_js() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/javascript; charset=utf-8")],
        LIVERELOAD_JS,
    )
}
