//! Command-line entry point for the mdserve preview server.
//!
//! Parses the command line, initializes tracing, and hands off to
//! [`mdserve::server::run`]. Log levels can be controlled through the
//! `RUST_LOG` environment variable.

use clap::Parser;
use mdserve::config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use mdserve::error::MdServeError;
use mdserve::server;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Preview Markdown files in the browser with live reload
#[derive(Debug, Parser)]
#[command(name = "mdserve", version)]
struct Cli {
    /// Markdown file or directory to serve (defaults to the current directory)
    file: Option<PathBuf>,

    /// Host name to bind and announce
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Color theme: light, dark or auto
    #[arg(long, default_value = "auto")]
    theme: String,

    /// Draw a bounding box around the rendered content
    #[arg(short, long)]
    bounding_box: bool,

    /// Do not open the browser after startup
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() -> Result<(), MdServeError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let (root, target) = split_target(cli.file);
    let config = ServerConfig::new(
        cli.host,
        cli.port,
        &cli.theme,
        cli.bounding_box,
        !cli.no_browser,
    );

    let cancel_token = CancellationToken::new();
    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested");
                cancel_token.cancel();
            }
        }
    });

    server::run(config, root, target, cancel_token).await
}

/// Split the CLI path argument into a content root and an optional target
/// file name inside it.
fn split_target(file: Option<PathBuf>) -> (PathBuf, Option<String>) {
    match file {
        Some(path) if path.is_dir() => (path, None),
        Some(path) => {
            let target = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let root = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (root, target)
        }
        None => (PathBuf::from("."), None),
    }
}
