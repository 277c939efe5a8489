//! GitHub Release Step - publishes a release and exposes its URL.

use github_release_step::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            log::error!("Fatal error: {e}");

            for suggestion in e.recovery_suggestions() {
                log::error!("  • {suggestion}");
            }

            process::exit(1);
        }
    }
}
