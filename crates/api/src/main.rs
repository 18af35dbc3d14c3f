use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_db::{MemoryStore, ProjectStore, SqliteStore};
use atelier_gateway::{GatewayConfig, ModelGateway, OpenRouterClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let mut config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // The model credential is required; fail fast, logging only a
    // redacted preview.
    let gateway_config = GatewayConfig::from_env().expect("OPENROUTER_API_KEY must be set");
    tracing::info!(
        model = %gateway_config.model,
        key = %gateway_config.key_preview(),
        "Model gateway configured",
    );
    config.credential_preview = Some(gateway_config.key_preview());

    // --- Project store ---
    // DATABASE_URL selects the durable SQLite backend; without it the
    // in-memory store is used (optionally bounded by MAX_PROJECTS).
    let store: Arc<dyn ProjectStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = SqliteStore::connect(&url)
                .await
                .expect("Failed to open project database");
            tracing::info!(database_url = %url, "SQLite project store ready");
            Arc::new(store)
        }
        Err(_) => {
            tracing::info!(max_records = ?config.max_projects, "In-memory project store ready");
            match config.max_projects {
                Some(max) => Arc::new(MemoryStore::with_capacity(max)),
                None => Arc::new(MemoryStore::new()),
            }
        }
    };

    // --- Model gateway ---
    let gateway: Arc<dyn ModelGateway> = Arc::new(OpenRouterClient::new(gateway_config));

    // --- Router ---
    let state = AppState {
        store,
        gateway,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutting down");
}
