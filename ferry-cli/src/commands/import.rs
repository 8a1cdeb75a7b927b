//! Import command handler
//!
//! Stages an endpoints file in the blob store, submits an import job that
//! defines a segment from it and waits for the job to finish.

use anyhow::Result;
use clap::Args;
use colored::*;
use ferry_client::FerryClient;
use ferry_sequencer::{
    BlobStore, HttpBlobStore, ImportReport, LocalBlobStore, SegmentImport, SegmentImportParams,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::WaitArgs;
use super::job::print_result;
use crate::config::{Config, StoreTarget};

/// Arguments of `ferry import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file with the endpoint definitions
    pub endpoints_file: PathBuf,

    /// Bucket to stage the file in (created if it does not exist)
    pub bucket: String,

    /// Role the import job assumes to read the bucket
    pub role_arn: String,

    /// Segment to create or update
    pub segment_name: String,

    /// Application that receives the endpoints
    pub application_id: String,

    #[command(flatten)]
    pub wait: WaitArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle `ferry import`
pub async fn handle_import(args: ImportArgs, config: &Config) -> Result<()> {
    let sequencer_config = args.wait.apply(&config.sequencer)?;
    let sequencer = super::http_sequencer(config, &args.application_id, sequencer_config);

    let store: Arc<dyn BlobStore> = match &config.store {
        StoreTarget::Http(url) => Arc::new(HttpBlobStore::new(FerryClient::new(url))),
        StoreTarget::Local(dir) => Arc::new(LocalBlobStore::new(dir)),
    };

    let workflow = SegmentImport::new(store, sequencer);
    let params = SegmentImportParams {
        endpoints_path: args.endpoints_file,
        bucket: args.bucket,
        role_arn: args.role_arn,
        segment_name: args.segment_name,
    };

    println!(
        "{}",
        format!(
            "Creating segment {} from {} . . .",
            params.segment_name,
            params.endpoints_path.display()
        )
        .bold()
    );

    let report = workflow.execute(&params).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report(&params, &report);
    }

    Ok(())
}

fn report_json(report: &ImportReport) -> serde_json::Value {
    serde_json::json!({
        "job_id": report.handle(),
        "staged_url": report.staged.url(),
        "bucket_created": report.bucket_created,
        "result": report.result,
    })
}

fn print_report(params: &SegmentImportParams, report: &ImportReport) {
    if report.bucket_created {
        println!("  Created bucket {}", params.bucket.cyan());
    }
    println!("  Staged:  {}", report.staged.url().dimmed());
    println!(
        "{}",
        format!("✓ Finished importing segment {}", params.segment_name)
            .green()
            .bold()
    );
    print_result(&report.result);
}
