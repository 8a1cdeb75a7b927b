//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod import;
mod job;

pub use import::ImportArgs;
pub use job::JobCommands;

use anyhow::Result;
use clap::{Args, Subcommand};
use ferry_client::FerryClient;
use ferry_sequencer::{
    HttpJobService, Sequencer, SequencerConfig, UnknownStatusPolicy,
};
use std::time::Duration;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stage an endpoints file and import it as a segment
    Import(ImportArgs),
    /// Inspect or wait for an existing import job
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Polling options shared by commands that wait for a job
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// Seconds between two status queries
    #[arg(long)]
    pub interval: Option<u64>,

    /// Give up after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// How to treat unrecognized job states: strict or running
    #[arg(long)]
    pub unknown_status: Option<UnknownStatusPolicy>,
}

impl WaitArgs {
    /// Applies the command-line overrides on top of `base`
    pub fn apply(&self, base: &SequencerConfig) -> Result<SequencerConfig> {
        let mut config = base.clone();
        if let Some(secs) = self.interval {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(policy) = self.unknown_status {
            config.unknown_status = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Builds a sequencer over the HTTP import job service of one application
pub fn http_sequencer(
    config: &Config,
    application_id: &str,
    sequencer: SequencerConfig,
) -> Sequencer<HttpJobService> {
    let service = HttpJobService::new(FerryClient::new(&config.service_url), application_id);
    Sequencer::new(service, sequencer)
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Import(args) => import::handle_import(args, config).await,
        Commands::Job { command } => job::handle_job_command(command, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_args_override_base() {
        let args = WaitArgs {
            interval: Some(10),
            timeout: Some(120),
            unknown_status: Some(UnknownStatusPolicy::Running),
        };

        let config = args.apply(&SequencerConfig::default()).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.unknown_status, UnknownStatusPolicy::Running);
    }

    #[test]
    fn test_wait_args_keep_base_when_absent() {
        let base = SequencerConfig::default().with_timeout(Duration::from_secs(60));
        let config = WaitArgs::default().apply(&base).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_wait_args_reject_zero_interval() {
        let args = WaitArgs {
            interval: Some(0),
            ..Default::default()
        };
        assert!(args.apply(&SequencerConfig::default()).is_err());
    }
}
