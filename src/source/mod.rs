//! Repository identity resolution (SSH and HTTP(S) remote URLs)

use crate::error::{Result, SourceError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches `user@host:owner/repo(.git)` and `http(s)://host/owner/repo(.git)`.
///
/// Owner and repo stop at the first `.`, which is what strips the `.git`
/// suffix. The match is unanchored and only the first match is used.
static REMOTE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:[A-Za-z0-9]+@|https?://)[A-Za-z0-9.-]+[:/](?P<owner>[^.]+)/(?P<repo>[^.]+)(?:\.git)?",
    )
    .expect("remote URL regex is valid")
});

/// Owner and name of the repository a release is published to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name without `.git`
    pub repo: String,
}

impl RepositoryIdentity {
    /// Derive the identity from a repository URL.
    ///
    /// Either both parts are found or the whole derivation fails.
    pub fn parse(url: &str) -> Result<Self> {
        let malformed = || SourceError::MalformedRepositoryUrl {
            url: url.to_string(),
        };

        let caps = REMOTE_URL_RE.captures(url.trim()).ok_or_else(malformed)?;
        let owner = caps.name("owner").map(|m| m.as_str()).unwrap_or_default();
        let repo = caps.name("repo").map(|m| m.as_str()).unwrap_or_default();

        if owner.is_empty() || repo.is_empty() {
            return Err(malformed().into());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl FromStr for RepositoryIdentity {
    type Err = crate::error::ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
