//! jtour-site - Jharkhand tourism web service
//!
//! Startup order: bootstrap config, tracing, build identification, config
//! outcome, root folder, review store, then the HTTP server with graceful
//! shutdown.

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jtour_common::config::{
    ensure_root_folder, resolve_maps_api_key, resolve_root_folder, LoggingConfig, TomlConfig,
};
use jtour_common::store::{open_store, StoreBackend};
use jtour_site::{build_router, AppState};

/// Command-line arguments for jtour-site
#[derive(Parser, Debug)]
#[command(name = "jtour-site")]
#[command(about = "Jharkhand tourism site: festivals, city guides, maps and flights")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "JTOUR_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "JTOUR_HOST")]
    host: Option<String>,

    /// Folder holding the review store
    #[arg(short, long, env = "JTOUR_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to ~/.config/jtour/config.toml or /etc/jtour/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Google Maps embed API key
    #[arg(long, env = "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    maps_api_key: Option<String>,

    /// Review store backend: memory, file or sqlite
    #[arg(long, value_parser = parse_backend)]
    store: Option<StoreBackend>,
}

fn parse_backend(value: &str) -> std::result::Result<StoreBackend, String> {
    match value {
        "memory" => Ok(StoreBackend::Memory),
        "file" => Ok(StoreBackend::File),
        "sqlite" => Ok(StoreBackend::Sqlite),
        other => Err(format!("unknown store backend '{}' (memory, file, sqlite)", other)),
    }
}

/// RUST_LOG wins over the configured level; a log file disables ANSI colours
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("jtour_site={0},jtour_common={0},tower_http=info", logging.level)))
        .context("Invalid log level")?;

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Log settings live in the config file, so it is read before tracing is up
    // and its outcome is logged afterwards
    let (config, config_source) = TomlConfig::load(args.config.as_deref());
    init_tracing(&config.logging)?;

    // Build identification immediately after tracing init
    info!(
        "Starting Jharkhand Tourism (jtour-site) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    ensure_root_folder(&root_folder).context("Failed to create root folder")?;
    info!("Root folder: {}", root_folder.display());

    let backend = args.store.unwrap_or(config.store);
    let store = open_store(backend, &root_folder)
        .await
        .context("Failed to open review store")?;

    let maps_api_key = resolve_maps_api_key(args.maps_api_key.as_deref(), &config);
    if maps_api_key.is_none() {
        info!("No maps API key configured, keyed embeds are skipped");
    }

    let today = chrono::Local::now().date_naive();
    let state = AppState::new(store, today)
        .with_approaches(config.viewer.approaches.clone())
        .with_maps_api_key(maps_api_key)
        .with_load_timeout(config.viewer.load_timeout())
        .with_viewer_idle_timeout(config.viewer.idle_timeout());
    info!(
        "Viewer chain: {} approaches, {}s load timeout",
        state.approaches.len(),
        state.load_timeout.as_secs()
    );
    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("jtour-site listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
