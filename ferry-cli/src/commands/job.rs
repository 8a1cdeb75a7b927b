//! Job command handlers
//!
//! Queries the status of an import job submitted earlier, or waits for it to
//! finish.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ferry_core::domain::job::{JobHandle, JobResult, JobStatus};

use super::WaitArgs;
use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Query the current status of a job once
    Status {
        /// Application the job belongs to
        application_id: String,
        /// Job ID returned on submission
        job_id: String,
    },
    /// Poll a job until it completes or fails
    Wait {
        /// Application the job belongs to
        application_id: String,
        /// Job ID returned on submission
        job_id: String,

        #[command(flatten)]
        wait: WaitArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    match command {
        JobCommands::Status {
            application_id,
            job_id,
        } => job_status(config, &application_id, JobHandle::new(job_id)).await,
        JobCommands::Wait {
            application_id,
            job_id,
            wait,
            json,
        } => wait_for_job(config, &application_id, JobHandle::new(job_id), &wait, json).await,
    }
}

/// Query and display the status of a job
async fn job_status(config: &Config, application_id: &str, handle: JobHandle) -> Result<()> {
    let sequencer = super::http_sequencer(config, application_id, config.sequencer.clone());
    let status = sequencer.poll(&handle).await?;

    println!("Job {}: {}", handle.to_string().cyan(), colorize_status(status));

    Ok(())
}

/// Wait for a job and display its result
async fn wait_for_job(
    config: &Config,
    application_id: &str,
    handle: JobHandle,
    wait: &WaitArgs,
    json: bool,
) -> Result<()> {
    let sequencer_config = wait.apply(&config.sequencer)?;
    let interval = sequencer_config.poll_interval;
    let sequencer = super::http_sequencer(config, application_id, sequencer_config);

    let result = sequencer.run_existing(handle, interval).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "✓ Job completed".green().bold());
        print_result(&result);
    }

    Ok(())
}

/// Print the outcome of a completed job, including failed entries
pub fn print_result(result: &JobResult) {
    println!("  Job:     {}", result.handle.to_string().cyan());

    if let Some(processed) = result.total_processed {
        println!("  Processed: {}", processed);
    }

    if let Some(completed) = result.completed_at {
        println!("  Completed: {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }

    if result.has_failures() {
        println!(
            "\n{}",
            "Failed to import the following entries:".yellow().bold()
        );
        for failure in &result.failures {
            println!("  {} {}", "✗".red(), failure);
        }
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Running => status_str.cyan(),
        JobStatus::Succeeded => status_str.green(),
        JobStatus::Failed => status_str.red(),
    }
}
