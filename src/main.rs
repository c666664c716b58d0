use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mallscope::{
    generate_customers, serve, write_csv, AppState, CustomerStore, ServerConfig, SqliteStore,
};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mallscope", version, about = "Customer segmentation dashboard backend")]
struct Cli {
    /// Dataset seed (overrides MALLSCOPE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// SQLite database backing the store (overrides MALLSCOPE_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Serve a CSV dataset instead of generated data (overrides MALLSCOPE_CSV)
    #[arg(long, global = true)]
    csv: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides MALLSCOPE_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Write the dataset as CSV
    ExportCsv {
        #[arg(long, default_value = "Mall_Customers.csv")]
        out: String,
    },
    /// Print totals and cluster summaries as JSON
    Summary,
    /// Write the generated dataset into a SQLite file
    Snapshot {
        #[arg(long)]
        out: String,
    },
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_config(cli: &Cli) -> ServerConfig {
    let mut config = ServerConfig::from_env();
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.db.is_some() {
        config.db_path = cli.db.clone();
    }
    if cli.csv.is_some() {
        config.csv_path = cli.csv.clone();
    }
    config.log_json |= cli.log_json;
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = resolve_config(&cli);
    init_tracing(config.log_json);

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            let store = config.open_store()?;
            serve(&config.bind, AppState::from_arc(store)).await?;
        }
        Command::ExportCsv { out } => {
            let customers = config.open_store()?.all_customers()?;
            let file = File::create(&out).context(format!("Failed to create {}", out))?;
            write_csv(BufWriter::new(file), &customers)
                .context(format!("Failed to write {}", out))?;
            info!(path = %out, customers = customers.len(), "csv written");
        }
        Command::Summary => {
            let store = config.open_store()?;
            let totals = store.totals()?;
            let clusters = store.cluster_summaries()?;
            let report = json!({ "summary": totals, "clusters": clusters });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Snapshot { out } => {
            let store = SqliteStore::new_in_memory()?;
            store.load_dataset(&generate_customers(config.seed), Some(config.seed))?;
            store.save_to_file(&out)?;
            info!(path = %out, seed = config.seed, "snapshot written");
        }
    }

    Ok(())
}
