use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use leaderboard::{
    api::{self, AppState},
    cli::Cli,
    service::Leaderboard,
    store::{MemoryStore, ScoreStore, SqliteStore},
};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

fn open_store(cli: &Cli) -> Result<Arc<dyn ScoreStore>> {
    if cli.ephemeral {
        info!("using in-memory score store; scores are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::open(&cli.database)
        .with_context(|| format!("failed to open database {}", cli.database.display()))?;
    info!("using score database {}", cli.database.display());
    Ok(Arc::new(store))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = ?err, "failed to install ctrl-c handler");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = open_store(&cli)?;
    let state = AppState::new(Leaderboard::new(store), cli.api_config());

    let addr = cli.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("server listening on {}", listener.local_addr()?);

    let app = api::router(state).into_make_service_with_connect_info::<SocketAddr>();
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        warn!("server exited with error: {err:?}");
        return Err(err.into());
    }

    Ok(())
}
