//! Command line interface for the release step.

mod args;
pub mod commands;

pub use args::Args;
pub use commands::execute_release;

use crate::error::Result;
use crate::export::EnvmanExporter;
use crate::github::build_http_client;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.print();

    let client = build_http_client(args.http_timeout_secs)?;
    let release = execute_release(&args, client, &EnvmanExporter::default()).await?;

    log::info!("Release published: {}", release.html_url);
    Ok(0)
}
