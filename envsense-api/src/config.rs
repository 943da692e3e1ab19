use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// TimescaleDB `sensor_data` hypertable
    Postgres,
    /// Empty in-process store, for local runs
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "envsense-api")]
#[command(about = "Bucketed min/max/avg queries over environmental sensor readings", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "ENVSENSE_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Which time-series store to query
    #[arg(long, env = "ENVSENSE_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Postgres connection string, required for the postgres store
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "ENVSENSE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Shared key expected in the X-API-Key header
    #[arg(long, env = "ENVSENSE_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("api key must not be empty");
        }
        if self.store == StoreKind::Postgres && self.database_url.is_none() {
            bail!("--database-url (or DATABASE_URL) is required for the postgres store");
        }
        if self.max_connections == 0 {
            bail!("max connections must be at least 1");
        }
        Ok(())
    }
}
