//! Bibliotek Server - Library Management REST API

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliotek_server::{
    api,
    config::AppConfig,
    repository::{store::JsonStore, Repository},
    services::{heartbeat, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing: console plus a daily-rolling log file
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bibliotek_server={},tower_http=debug", config.logging.level).into()
    });

    let file_appender = tracing_appender::rolling::daily(&config.logging.directory, "app.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    tracing::info!("Starting Bibliotek Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the flat-file store
    let store = JsonStore::new(&config.storage.path).expect("Failed to open storage directory");
    tracing::info!("Storage directory: {}", config.storage.path);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(Arc::new(store));
    let services =
        Services::new(repository, config.external_api.clone()).expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Liveness heartbeat, helps diagnose unexpected shutdowns
    heartbeat::spawn();

    // Build router
    let app = api::create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
