use crate::customer::DEFAULT_SEED;
use crate::clusterer::ProfileTable;
use crate::export::parse_csv_with;
use crate::store::{CustomerStore, MemoryStore, SqliteStore};
use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Runtime settings, read from `MALLSCOPE_*` variables and then
/// overridden by command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub seed: u64,
    /// SQLite file backing the store; in-memory when unset
    pub db_path: Option<String>,
    /// CSV dataset to serve instead of generated data
    pub csv_path: Option<String>,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            seed: DEFAULT_SEED,
            db_path: None,
            csv_path: None,
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_string("MALLSCOPE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            seed: env_u64("MALLSCOPE_SEED", DEFAULT_SEED),
            db_path: env_string("MALLSCOPE_DB"),
            csv_path: env_string("MALLSCOPE_CSV"),
            log_json: env_bool("MALLSCOPE_LOG_JSON", false),
        }
    }

    /// Build the store this configuration describes.
    ///
    /// A CSV dataset wins over a database path; with neither, the seeded
    /// generator fills an in-memory store.
    pub fn open_store(&self) -> Result<Arc<dyn CustomerStore>> {
        if let Some(path) = &self.csv_path {
            let raw = std::fs::read_to_string(path)
                .context(format!("Failed to read CSV dataset: {}", path))?;
            let customers = parse_csv_with(&raw, &ProfileTable::segments())
                .context(format!("Failed to parse CSV dataset: {}", path))?;
            info!(path = %path, customers = customers.len(), "loaded csv dataset");
            let store = MemoryStore::new(customers)
                .context(format!("Invalid CSV dataset: {}", path))?;
            return Ok(Arc::new(store));
        }

        if let Some(path) = &self.db_path {
            let store = SqliteStore::open_seeded(path, self.seed)?;
            let customers = store.customer_count()?;
            info!(path = %path, customers, "opened sqlite store");
            return Ok(Arc::new(store));
        }

        info!(seed = self.seed, "generating in-memory dataset");
        Ok(Arc::new(MemoryStore::seeded(self.seed)))
    }
}
