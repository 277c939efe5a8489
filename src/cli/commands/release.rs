//! Main release implementation.
//!
//! Resolves the repository, publishes the release, uploads the optional
//! asset and exposes the release URL, strictly in that order.

use crate::cli::Args;
use crate::error::Result;
use crate::export::{OutputExporter, RELEASE_URL_KEY};
use crate::github::{AssetFile, GitHubApiConfig, GitHubRelease, GitHubReleaseManager};
use crate::notes::collect_release_notes;
use crate::source::RepositoryIdentity;
use std::path::Path;
use std::time::Duration;

/// Run the release step.
///
/// Identity resolution, release creation and export failures are returned;
/// changelog and asset failures are logged and the step carries on. Returns
/// the release as last seen from the API.
pub async fn execute_release<E: OutputExporter>(
    args: &Args,
    client: reqwest::Client,
    exporter: &E,
) -> Result<GitHubRelease> {
    let identity = RepositoryIdentity::parse(&args.repository_url)?;
    log::info!("Repository: {identity}");

    let api_config = GitHubApiConfig::new(identity, &args.github_auth_token)
        .with_base_urls(&args.github_api_base_url, &args.github_upload_base_url);
    let manager = GitHubReleaseManager::new(client, api_config)
        .with_request_timeout(Duration::from_secs(args.http_timeout_secs));

    let notes = collect_release_notes(&args.changelog_file_list).await;
    let mut release = args.release(notes);

    manager.create_release(&mut release).await?;

    if let Some(path) = args.asset_path() {
        match upload_asset(&manager, &release, path).await {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::error!("Asset {} was not uploaded: {e}", path.display()),
        }
    }

    exporter.export(RELEASE_URL_KEY, &release.html_url).await?;

    Ok(release)
}

async fn upload_asset(
    manager: &GitHubReleaseManager,
    release: &GitHubRelease,
    path: &Path,
) -> Result<()> {
    let asset = AssetFile::open(path).await?;
    manager.upload_asset(release, asset).await
}
