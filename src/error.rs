//! Error types for the release step.
//!
//! Every failure carries the operation attempted and the underlying cause so
//! a CI log is enough to diagnose it without re-running the step.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release step operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release step operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Repository identity errors
    #[error("Repository error: {0}")]
    Source(#[from] SourceError),

    /// Release notes collection errors
    #[error("Release notes error: {0}")]
    Notes(#[from] NotesError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Step output export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Repository identity errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Owner and repository could not be obtained from the URL
    #[error("Malformed repository URL '{url}': owner and repository could not be obtained")]
    MalformedRepositoryUrl {
        /// URL as configured
        url: String,
    },
}

/// Release notes errors
#[derive(Error, Debug)]
pub enum NotesError {
    /// A changelog fragment could not be read
    #[error("Failed to read changelog file {path}: {source}")]
    FileRead {
        /// Path of the fragment
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// GitHub releases API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The create-release request failed or was rejected
    #[error("GitHub API could not create release: {reason}")]
    ReleaseCreationFailed {
        /// Status line, transport error or decode error
        reason: String,
    },

    /// The asset upload request failed or was rejected
    #[error("Asset upload failed: {reason}")]
    AssetUploadFailed {
        /// Status line or transport error
        reason: String,
    },

    /// The asset path can't be uploaded
    #[error("Invalid asset {path}: {reason}")]
    InvalidAsset {
        /// Asset path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {reason}")]
    ClientInit {
        /// Reason for the error
        reason: String,
    },
}

/// Step output export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// The export command could not run or exited unsuccessfully
    #[error("Failed to expose output '{key}': {reason}")]
    Failed {
        /// Output key
        key: String,
        /// Exit status and command output
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Source(SourceError::MalformedRepositoryUrl { .. }) => vec![
                "Set repository_url to an SSH (git@host:owner/repo.git) or HTTPS (https://host/owner/repo) URL".to_string(),
            ],
            ReleaseError::GitHub(GitHubError::ReleaseCreationFailed { .. }) => vec![
                "Verify github_auth_token is valid and has write access to the repository".to_string(),
                "Check that a release for release_tag does not already exist".to_string(),
            ],
            ReleaseError::Export(ExportError::Failed { .. }) => vec![
                "Ensure the bitrise CLI is installed and on PATH".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if this error must abort the step
    ///
    /// Missing changelog fragments and failed asset uploads are additive and
    /// never abort; everything else prevents a usable release from existing.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ReleaseError::Notes(_)
                | ReleaseError::GitHub(GitHubError::AssetUploadFailed { .. })
                | ReleaseError::GitHub(GitHubError::InvalidAsset { .. })
        )
    }
}
