use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use alpinegen::ResortConfig;

#[derive(Debug, Parser)]
#[command(author, version, about = "Synthetic ski resort telemetry service")]
struct Cli {
    /// Path to the resort YAML config (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the simulation seed
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ResortConfig::load(path)?,
        None => ResortConfig::default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    alpinegen::web::run(config).await
}
