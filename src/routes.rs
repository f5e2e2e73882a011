//! Request routing.
//!
//! Classifies each request path as Markdown or static. Markdown paths are
//! read, rendered and wrapped in the page shell; everything else, including
//! Markdown files that cannot be read, goes through the static responder so
//! there is exactly one canonical not-found behavior.

use crate::server::AppState;
use crate::{page, render};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode_str;
use std::io;
use std::sync::Arc;
use tower::ServiceExt;

/// Result of attempting the Markdown branch for a request path.
pub enum MarkdownOutcome {
    /// File was read and rendered to an HTML fragment
    Rendered(String),
    /// File does not exist; the static responder owns the 404
    NotFound,
    /// File exists but could not be read
    Failed(io::Error),
}

/// Whether a request path names a Markdown document.
pub fn is_markdown(url_path: &str) -> bool {
    percent_decode_str(url_path)
        .decode_utf8_lossy()
        .to_ascii_lowercase()
        .ends_with(".md")
}

/// Main fallback handler: render Markdown or delegate to the static responder.
pub async fn serve_path(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let path = request.uri().path().to_owned();

    if !is_markdown(&path) {
        return serve_static(&state, request).await;
    }

    match load_markdown(&state, &path).await {
        MarkdownOutcome::Rendered(fragment) => {
            match page::compose(&fragment, state.config.theme, state.config.bounding_box) {
                Ok(document) => Html(document).into_response(),
                Err(e) => {
                    tracing::error!("Failed to render page template for {path}: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Could not render page").into_response()
                }
            }
        }
        MarkdownOutcome::NotFound => serve_static(&state, request).await,
        MarkdownOutcome::Failed(e) => {
            tracing::debug!("Reading {path} failed ({e}), falling back to static responder");
            serve_static(&state, request).await
        }
    }
}

/// Read and render a Markdown file, tagging the failure mode for the caller.
async fn load_markdown(state: &AppState, url_path: &str) -> MarkdownOutcome {
    match state.content.read(url_path).await {
        Ok(bytes) => MarkdownOutcome::Rendered(render::render(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => MarkdownOutcome::NotFound,
        Err(e) => MarkdownOutcome::Failed(e),
    }
}

/// Delegate to the file server; its 200/304/404 semantics are authoritative.
async fn serve_static(state: &AppState, request: Request) -> Response {
    match state.static_server.clone().oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(infallible) => match infallible {},
    }
}
