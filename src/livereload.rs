//! Live-reload plumbing.
//!
//! A [`ReloadHub`] fans file-change notifications out to any number of
//! connected browser tabs. The notify watcher feeds the hub from its own
//! thread, an SSE endpoint delivers events to clients, and a response
//! middleware injects the client script into every served HTML page so no
//! polling code has to be written by hand.

use crate::server::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Script tag injected into served HTML pages.
const SCRIPT_TAG: &str = "<script src=\"/static/livereload.js\"></script>";

/// Broadcast point for file-change notifications.
///
/// Cloning the hub shares the underlying channel; every subscriber gets
/// every notification. Delivery is best-effort with no ordering guarantees
/// relative to in-flight responses.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    tx: broadcast::Sender<()>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Notify all connected listeners that watched files changed.
    pub fn notify_changed(&self) {
        // Send only fails when nobody is connected, which is fine
        let _ = self.tx.send(());
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Start watching a directory tree, feeding change events into the hub.
///
/// The returned watcher must be kept alive for as long as notifications
/// should flow; dropping it stops the background watching.
pub fn watch(dir: &Path, hub: ReloadHub) -> notify::Result<RecommendedWatcher> {
    let mut watcher =
        notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                    tracing::debug!("File change detected: {:?}", event.paths);
                    hub.notify_changed();
                }
            }
            Err(e) => {
                tracing::error!("File watcher error: {e}");
            }
        })?;

    watcher.watch(dir, RecursiveMode::Recursive)?;
    tracing::info!("Watching {} for changes", dir.display());
    Ok(watcher)
}

/// SSE endpoint streaming one `reload` event per file change.
pub async fn reload_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.hub.subscribe();

    let stream = BroadcastStream::new(rx)
        .filter_map(|msg| msg.ok().map(|()| Ok(Event::default().data("reload"))));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Middleware injecting the live-reload client into HTML responses.
///
/// Non-HTML responses and responses without a body (304, ranges) pass
/// through untouched.
pub async fn inject_reload_script(request: Request, next: Next) -> Response {
    // HEAD responses have no body to patch
    let is_get = request.method() == axum::http::Method::GET;
    let response = next.run(request).await;

    if !is_get || response.status() != StatusCode::OK || !is_html(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::error!("Failed to buffer response body for script injection: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let patched = inject_script(&bytes);
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(patched.len()));
    Response::from_parts(parts, Body::from(patched))
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("text/html"))
        .unwrap_or(false)
}

/// Insert the script tag before `</body>`, or append it when the document
/// has no closing body tag.
fn inject_script(html: &[u8]) -> Vec<u8> {
    let needle = b"</body>";
    let position = html
        .windows(needle.len())
        .rposition(|window| window.eq_ignore_ascii_case(needle));

    let mut patched = Vec::with_capacity(html.len() + SCRIPT_TAG.len());
    match position {
        Some(at) => {
            patched.extend_from_slice(&html[..at]);
            patched.extend_from_slice(SCRIPT_TAG.as_bytes());
            patched.extend_from_slice(&html[at..]);
        }
        None => {
            patched.extend_from_slice(html);
            patched.extend_from_slice(SCRIPT_TAG.as_bytes());
        }
    }
    patched
}
