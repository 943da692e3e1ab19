use anyhow::Result;
use clap::Parser;
use envsense_api::{AppState, Config, StaticApiKey, StoreKind, build_router};
use envsense_store::{MemoryStore, PgStore, SummaryService, TimeSeriesStore};
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;

    let store = time_series_store(&config).await?;
    let state = AppState::new(
        SummaryService::new(store),
        Arc::new(StaticApiKey::new(config.api_key.clone())),
    );
    let rtr = build_router(state);

    let listener = TcpListener::bind(config.listen).await?;
    info!("Listening on {}", config.listen);

    axum::serve(listener, rtr)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn time_series_store(config: &Config) -> Result<Arc<dyn TimeSeriesStore>> {
    match (config.store, config.database_url.as_deref()) {
        (StoreKind::Postgres, Some(url)) => {
            let store = PgStore::connect(url, config.max_connections).await?;
            info!("Connected to TimescaleDB");
            Ok(Arc::new(store))
        }
        (StoreKind::Postgres, None) => {
            anyhow::bail!("--database-url (or DATABASE_URL) is required for the postgres store")
        }
        (StoreKind::Memory, _) => {
            warn!("Using an empty in-memory store; readings are not persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
