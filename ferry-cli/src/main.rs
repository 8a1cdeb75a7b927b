//! Ferry CLI
//!
//! Command-line interface for staging endpoint files and running import jobs
//! to completion.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::{Config, StoreTarget};
use ferry_sequencer::SequencerConfig;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "Submit import jobs and wait for them to finish", long_about = None)]
struct Cli {
    /// Import job service URL
    #[arg(long, env = "FERRY_SERVICE_URL", default_value = "http://localhost:8080")]
    service_url: String,

    /// Blob staging store URL (defaults to the service URL)
    #[arg(long, env = "FERRY_STORE_URL")]
    store_url: Option<String>,

    /// Stage files into this directory instead of a remote store
    #[arg(long, env = "FERRY_LOCAL_STORE", conflicts_with = "store_url")]
    local_store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ferry=info,ferry_sequencer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let sequencer = SequencerConfig::from_env().context("Invalid sequencer environment")?;

    let store = match (cli.local_store, cli.store_url) {
        (Some(dir), _) => StoreTarget::Local(dir),
        (None, Some(url)) => StoreTarget::Http(url),
        (None, None) => StoreTarget::Http(cli.service_url.clone()),
    };

    let config = Config {
        service_url: cli.service_url,
        store,
        sequencer,
    };
    debug!(
        "Service URL: {}, store: {:?}, sequencer: {:?}",
        config.service_url, config.store, config.sequencer
    );

    if let Err(e) = handle_command(cli.command, &config).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
