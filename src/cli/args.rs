//! Step configuration.
//!
//! Every option is read once at startup, from a flag or from the step
//! environment variable of the same name. Nothing else reads the environment.

use crate::github::{DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL, GitHubRelease};
use clap::{ArgAction, Parser};
use std::convert::Infallible;
use std::path::Path;

/// Only the exact string `true` enables a flag.
fn parse_flag(value: &str) -> Result<bool, Infallible> {
    Ok(value == "true")
}

/// Publish a GitHub release from changelog fragments
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "github_release_step",
    version,
    about = "Publish a GitHub release from changelog fragments",
    long_about = "Create a GitHub release for the repository behind repository_url,
using the concatenated changelog files as release notes, optionally upload one
asset, and expose the release page as RELEASE_URL.

All options may be given as environment variables:
  repository_url=git@github.com:owner/repo.git release_tag=1.0.0 github_release_step"
)]
pub struct Args {
    /// Token forwarded to the API as access_token
    #[arg(long, env = "github_auth_token", default_value = "", hide_env_values = true)]
    pub github_auth_token: String,

    /// Repository URL (SSH or HTTPS) the release is created for
    #[arg(long, env = "repository_url", default_value = "")]
    pub repository_url: String,

    /// `|`-separated changelog files, concatenated into the release notes
    #[arg(long, env = "changelog_file_list", default_value = "")]
    pub changelog_file_list: String,

    /// Tag of the release
    #[arg(long, env = "release_tag", default_value = "")]
    pub release_tag: String,

    /// Display name of the release
    #[arg(long, env = "release_name", default_value = "")]
    pub release_name: String,

    /// Commit, branch or tag the release points at
    #[arg(long, env = "target_commitish", default_value = "")]
    pub target_commitish: String,

    /// Create an unpublished draft ("true" to enable)
    #[arg(long, env = "is_draft", default_value = "false", action = ArgAction::Set, value_parser = parse_flag)]
    pub is_draft: bool,

    /// Mark as prerelease ("true" to enable)
    #[arg(long, env = "is_prerelease", default_value = "false", action = ArgAction::Set, value_parser = parse_flag)]
    pub is_prerelease: bool,

    /// File uploaded as release asset
    #[arg(long, env = "upload_asset_file", default_value = "")]
    pub upload_asset_file: String,

    /// REST API base URL
    #[arg(long, env = "github_api_base_url", default_value = DEFAULT_API_BASE_URL)]
    pub github_api_base_url: String,

    /// Upload host base URL
    #[arg(long, env = "github_upload_base_url", default_value = DEFAULT_UPLOAD_BASE_URL)]
    pub github_upload_base_url: String,

    /// Connect timeout, and deadline for the create-release request, in
    /// seconds (0 disables). Asset uploads have no total deadline.
    #[arg(long, env = "http_timeout_secs", default_value_t = 300)]
    pub http_timeout_secs: u64,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Asset to upload, if one is configured
    pub fn asset_path(&self) -> Option<&Path> {
        let path = self.upload_asset_file.trim();
        (!path.is_empty()).then(|| Path::new(path))
    }

    /// Local release record built from the configuration and notes
    pub fn release(&self, notes: impl Into<String>) -> GitHubRelease {
        GitHubRelease::new(
            &self.release_tag,
            &self.release_name,
            &self.target_commitish,
            notes,
            self.is_draft,
            self.is_prerelease,
        )
    }

    /// Log the configuration with the token redacted
    pub fn print(&self) {
        let token = if self.github_auth_token.is_empty() {
            "<empty>"
        } else {
            "[REDACTED]"
        };

        log::info!("Configs:");
        log::info!("- GitHubAuthToken: {token}");
        log::info!("- RepositoryURL: {}", self.repository_url);
        log::info!("- ChangelogFileList: {}", self.changelog_file_list);
        log::info!("- ReleaseTag: {}", self.release_tag);
        log::info!("- ReleaseName: {}", self.release_name);
        log::info!("- TargetCommitish: {}", self.target_commitish);
        log::info!("- IsDraft: {}", self.is_draft);
        log::info!("- IsPrerelease: {}", self.is_prerelease);
        log::info!(
            "- UploadAssetFile: {}",
            self.asset_path().map(|p| p.display().to_string()).unwrap_or_default()
        );
        log::info!("- GitHubApiBaseURL: {}", self.github_api_base_url);
        log::info!("- GitHubUploadBaseURL: {}", self.github_upload_base_url);
        log::info!("- HttpTimeoutSecs: {}", self.http_timeout_secs);
    }
}
