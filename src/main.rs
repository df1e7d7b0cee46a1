use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use taskd::config::{FileConfig, ServiceConfig};
use taskd::rest::start_rest_server;
use taskd::tasks::{seed, store::TaskStore};
use taskd::AppContext;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskd", about = "taskd — in-memory task CRUD HTTP service", version)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "TASKD_PORT")]
    port: Option<u16>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind_address: Option<String>,

    /// Seed file with the initial task population ({"tasks": [...]})
    #[arg(long, env = "TASKD_SEED")]
    seed: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Optional TOML config file
    #[arg(long, env = "TASKD_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let file = match args.config.as_deref().map(FileConfig::load) {
        Some(Ok(file)) => file,
        Some(Err(e)) => {
            eprintln!("taskd: {e:#}");
            std::process::exit(1);
        }
        None => FileConfig::default(),
    };
    let config = ServiceConfig::new(args.port, args.bind_address, args.seed, args.log, file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)),
        )
        .init();

    if let Err(e) = run(config).await {
        // Startup failures (unreadable seed, bind failure) are the only
        // fatal paths; request errors never reach here.
        error!("fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> Result<()> {
    let tasks = seed::load(&config.seed_path)?;
    info!(count = tasks.len(), "seeded task store");

    let ctx = Arc::new(AppContext::new(config, TaskStore::new(tasks)));
    start_rest_server(ctx).await
}
