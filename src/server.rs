use crate::config::ServerConfig;
use crate::content::ContentRoot;
use crate::error::{MdServeError, Result};
use crate::livereload::{self, ReloadHub};
use crate::{assets, routes};
use axum::routing::get;
use axum::{middleware, Router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use url::Url;

/// Shared state for request handlers.
///
/// Everything in here is read-only after startup except the reload hub,
/// whose broadcast channel is safe for concurrent use.
pub struct AppState {
    pub config: ServerConfig,
    pub content: ContentRoot,
    pub static_server: ServeDir,
    pub hub: ReloadHub,
}

impl AppState {
    pub fn new(config: ServerConfig, root: PathBuf) -> Self {
        Self {
            content: ContentRoot::new(root.clone()),
            static_server: ServeDir::new(root),
            hub: ReloadHub::new(),
            config,
        }
    }
}

/// Build the composed handler chain: embedded assets, reload endpoint,
/// Markdown/static dispatch, all wrapped by the script-injection middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/static/style.css", get(assets::style_css))
        .route("/static/livereload.js", get(assets::livereload_js))
        .route("/__livereload", get(livereload::reload_events))
        .fallback(routes::serve_path)
        .layer(middleware::from_fn(livereload::inject_reload_script))
        .with_state(state)
}

/// Run the preview server until the cancellation token fires.
///
/// `root` is the content directory; `target` is the base name of an
/// explicitly requested file inside it, if any.
///
/// # Errors
///
/// Returns an error if the content directory cannot be watched or if the
/// listener fails to bind. A bind failure is fatal; serving cannot proceed.
pub async fn run(
    config: ServerConfig,
    root: PathBuf,
    target: Option<String>,
    cancel_token: CancellationToken,
) -> Result<()> {
    tracing::info!("Initializing server for {}", root.display());

    let state = Arc::new(AppState::new(config.clone(), root.clone()));

    // The watcher stops when dropped, so it lives as long as the server
    let _watcher = livereload::watch(&root, state.hub.clone())?;

    let app = build_router(state);

    let url = announced_url(&config, &root, target.as_deref());
    println!("🚀 Starting server: {url}");

    if config.browser {
        if let Err(e) = webbrowser::open(&url) {
            tracing::error!("Failed to open browser: {e}");
        }
    }

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(MdServeError::Bind)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .map_err(MdServeError::Server)?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Compute the URL reported to the operator and opened in the browser.
///
/// With no explicit target, a conventional `README.md` in the content root
/// is preferred as the landing page.
fn announced_url(config: &ServerConfig, root: &Path, target: Option<&str>) -> String {
    let base = format!("http://{}:{}/", config.host, config.port);

    let landing = match target {
        Some(name) => Some(name.to_string()),
        None => root
            .join("README.md")
            .is_file()
            .then(|| "README.md".to_string()),
    };

    let Some(landing) = landing else {
        return base;
    };

    Url::parse(&base)
        .and_then(|url| url.join(&landing))
        .map(|url| url.to_string())
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(host: &str, port: u16) -> ServerConfig {
        ServerConfig::new(host.to_string(), port, "auto", false, false)
    }

    #[test]
    fn test_announced_url_prefers_readme() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("README.md"), "# Hi").expect("Failed to write file");

        let url = announced_url(&config("localhost", 6419), dir.path(), None);
        assert_eq!(url, "http://localhost:6419/README.md");
    }

    #[test]
    fn test_announced_url_without_readme_is_root() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let url = announced_url(&config("localhost", 6419), dir.path(), None);
        assert_eq!(url, "http://localhost:6419/");
    }

    #[test]
    fn test_announced_url_with_explicit_target() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("README.md"), "# Hi").expect("Failed to write file");

        let url = announced_url(&config("127.0.0.1", 8080), dir.path(), Some("notes.md"));
        assert_eq!(url, "http://127.0.0.1:8080/notes.md");
    }

    #[test]
    fn test_announced_url_escapes_target_name() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let url = announced_url(&config("localhost", 6419), dir.path(), Some("my notes.md"));
        assert_eq!(url, "http://localhost:6419/my%20notes.md");
    }
}
