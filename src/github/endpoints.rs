//! GitHub releases API endpoints

use crate::error::{GitHubError, Result};
use crate::source::RepositoryIdentity;
use url::Url;

/// Public GitHub REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Public GitHub upload host
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://uploads.github.com";

/// Endpoint configuration for one repository
#[derive(Debug, Clone)]
pub struct GitHubApiConfig {
    /// Target repository
    pub identity: RepositoryIdentity,
    /// Token forwarded as the `access_token` parameter
    pub auth_token: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Upload host base URL
    pub upload_base_url: String,
}

impl GitHubApiConfig {
    /// Endpoints on the public GitHub service
    pub fn new(identity: RepositoryIdentity, auth_token: impl Into<String>) -> Self {
        Self {
            identity,
            auth_token: auth_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
        }
    }

    /// Override both base URLs (GitHub Enterprise, local test servers)
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        upload_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.upload_base_url = upload_base_url.into();
        self
    }

    /// `POST {api}/repos/{owner}/{repo}/releases?access_token={token}`
    pub fn create_release_url(&self) -> Result<Url> {
        let mut url = self.repo_url(&self.api_base_url, "releases")?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.auth_token);
        Ok(url)
    }

    /// `POST {uploads}/repos/{owner}/{repo}/releases/{id}/assets?access_token={token}&name={name}`
    pub fn upload_asset_url(&self, release_id: u64, name: &str) -> Result<Url> {
        let mut url =
            self.repo_url(&self.upload_base_url, &format!("releases/{release_id}/assets"))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.auth_token)
            .append_pair("name", name);
        Ok(url)
    }

    fn repo_url(&self, base: &str, path: &str) -> Result<Url> {
        let raw = format!(
            "{}/repos/{}/{}/{}",
            base.trim_end_matches('/'),
            self.identity.owner,
            self.identity.repo,
            path
        );
        Url::parse(&raw).map_err(|e| {
            GitHubError::ClientInit {
                reason: format!("invalid endpoint URL '{raw}': {e}"),
            }
            .into()
        })
    }
}

/// URL without its query string; the query carries the token.
pub fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
