//! # mdserve
//!
//! Local Markdown preview server with live reload.
//!
//! mdserve watches a directory, serves Markdown files as rendered HTML with
//! syntax-highlighted code blocks, serves everything else as static assets,
//! and pushes a reload signal to connected browser tabs whenever watched
//! files change.
//!
//! ## Getting Started
//!
//! ```no_run
//! use mdserve::{config::ServerConfig, server};
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mdserve::error::MdServeError> {
//!     let config = ServerConfig::new("localhost".to_string(), 6419, "auto", false, false);
//!     let cancel_token = CancellationToken::new();
//!
//!     server::run(config, PathBuf::from("."), None, cancel_token).await
//! }
//! ```
//!
//! ## Architecture
//!
//! Requests flow through the live-reload middleware into the router, which
//! classifies each path as Markdown (render and wrap in the page shell) or
//! static (delegate to the file server). A notify watcher feeds file-change
//! events into a broadcast hub consumed by connected SSE clients.

/// Custom error types module
///
/// Defines the `MdServeError` enum and a `Result` alias used for consistent
/// error handling across the application.
pub mod error;

/// Server configuration module
///
/// Holds the immutable `ServerConfig` value constructed from the command
/// line, including theme normalization.
pub mod config;

/// Content directory access
///
/// Resolves URL paths to files inside the content root and reads them,
/// rejecting anything that would escape the root.
pub mod content;

/// Markdown rendering adapter
///
/// Converts Markdown bytes to HTML fragments with GitHub-flavored
/// extensions and syntect-classed code blocks.
pub mod render;

/// Syntax-highlight CSS provider
///
/// Generates the stylesheets matching the renderer's classed spans; the
/// light/dark pair is memoized for the server lifetime.
pub mod highlight;

/// Page composition module
///
/// Wraps rendered fragments into a complete themed HTML document.
pub mod page;

/// Embedded framework assets
///
/// The default stylesheet and live-reload client served under `/static/`.
pub mod assets;

/// Request routing module
///
/// Dispatches each request to the Markdown renderer or the static file
/// server, with read failures falling through to the static 404 path.
pub mod routes;

/// Live-reload module
///
/// File watcher, broadcast hub, SSE endpoint and the middleware that
/// injects the reload client into served HTML.
pub mod livereload;

/// Server orchestration module
///
/// Wires configuration, watcher, router and listener together and runs the
/// server until cancelled.
pub mod server;
