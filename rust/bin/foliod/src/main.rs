//! `foliod`: the portfolio server.
//!
//! Usage:
//!   foliod -c <name-or-path> [--listen <addr>]
//!
//! A bare name resolves to `/etc/folio/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod auth_middleware;
mod bootstrap;
mod config;
mod contact;
mod gate;
mod login;
mod messages;
mod routes;
mod site;
mod upload;

use std::sync::Arc;

use clap::Parser;
use portfolio::ProfileStore;
use tracing::info;

use config::ServerConfig;
use gate::TokenGate;
use messages::MessageStore;
use routes::AppState;

/// Portfolio server.
#[derive(Parser, Debug)]
#[command(name = "foliod", about = "Portfolio server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:5000")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    std::fs::create_dir_all(&server_config.storage.data_dir)?;

    let kv: Arc<dyn folio_kv::KVStore> = Arc::new(
        folio_kv::RedbStore::open(&server_config.redb_path())
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );
    let store = ProfileStore::new(kv);
    bootstrap::ensure_profile_seeded(&store)?;

    let messages = MessageStore::open(&server_config.sqlite_path())
        .map_err(|e| anyhow::anyhow!("failed to open message store: {}", e))?;

    let verifier = bootstrap::build_verifier(&server_config)?;
    let gate = TokenGate::new(verifier, &server_config.auth.token_secret);

    let app_state = AppState {
        config: Arc::new(server_config),
        gate: Arc::new(gate),
        store,
        messages: Arc::new(messages),
        upload_slot: Arc::new(tokio::sync::Mutex::new(())),
    };
    let app = routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("foliod listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
