//! # GitHub Release Step
//!
//! CI pipeline step that publishes a GitHub release.
//!
//! The step derives `owner/repo` from the repository URL, concatenates the
//! configured changelog files into release notes, creates the release through
//! the REST API, optionally uploads one binary asset and exposes the release
//! page URL to later steps as `RELEASE_URL`.
//!
//! ## Usage
//!
//! ```bash
//! repository_url=git@github.com:owner/repo.git \
//! release_tag=1.2.0 \
//! changelog_file_list="CHANGELOG.md|docs/upgrade.md" \
//! upload_asset_file=dist/app.zip \
//! github_release_step
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod error;
pub mod export;
pub mod github;
pub mod notes;
pub mod source;

// Re-export main types for public API
pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use export::{EnvmanExporter, OutputExporter};
pub use github::{GitHubRelease, GitHubReleaseManager};
pub use source::RepositoryIdentity;
