//! GitHub release manager: creates the release and uploads its asset

use super::endpoints::{GitHubApiConfig, redact};
use super::release::GitHubRelease;
use crate::error::{GitHubError, Result};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Body, Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use url::Url;

/// Media type used when the asset extension is unknown
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Build the HTTP client shared by both requests.
///
/// `timeout_secs` bounds connection setup only; a zero timeout leaves it
/// unbounded. Whole-request deadlines are set per request by
/// [`GitHubReleaseManager::with_request_timeout`].
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    let user_agent = HeaderValue::from_static(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    let mut builder = Client::builder().default_headers(
        [(USER_AGENT, user_agent)].into_iter().collect(),
    );
    if timeout_secs > 0 {
        builder = builder.connect_timeout(Duration::from_secs(timeout_secs));
    }

    builder.build().map_err(|e| {
        GitHubError::ClientInit {
            reason: e.to_string(),
        }
        .into()
    })
}

/// Local file opened for upload as a release asset
#[derive(Debug)]
pub struct AssetFile {
    path: PathBuf,
    file: File,
}

impl AssetFile {
    /// Open the asset for reading.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        match File::open(&path).await {
            Ok(file) => Ok(Self { path, file }),
            Err(e) => Err(GitHubError::InvalidAsset {
                path,
                reason: format!("cannot open: {e}"),
            }
            .into()),
        }
    }

    /// Path the asset was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Everything about an asset upload request except the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    /// Upload endpoint including token and name parameters
    pub url: Url,
    /// Base file name sent as `name`
    pub name: String,
    /// Inferred media type
    pub content_type: String,
    /// File size in bytes
    pub content_length: u64,
}

/// Media type for a file name, falling back to `application/octet-stream`.
pub fn media_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MEDIA_TYPE)
}

/// Transport error text without the request URL, whose query carries the
/// token. The redacted URL and the cause chain are appended instead.
pub fn describe_transport_error(error: reqwest::Error, url: &Url) -> String {
    let error = error.without_url();
    let mut text = format!("{} for {}", error, redact(url));
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        text.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    text
}

/// GitHub release manager
pub struct GitHubReleaseManager {
    /// HTTP client
    client: Client,
    /// Endpoint configuration
    config: GitHubApiConfig,
    /// Deadline for the create-release request
    request_timeout: Option<Duration>,
}

impl GitHubReleaseManager {
    /// Create new GitHub release manager
    pub fn new(client: Client, config: GitHubApiConfig) -> Self {
        Self {
            client,
            config,
            request_timeout: None,
        }
    }

    /// Bound the create-release request to `timeout` (zero disables).
    ///
    /// Asset uploads have no total deadline; only connection setup is bounded.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Create the release and overwrite `release` with the server's values.
    ///
    /// Anything but `201 Created` fails; transport errors surface as-is with
    /// no retry.
    pub async fn create_release(&self, release: &mut GitHubRelease) -> Result<()> {
        let creation_failed = |reason: String| GitHubError::ReleaseCreationFailed { reason };

        let url = self.config.create_release_url()?;
        let payload = serde_json::to_string(release)?;
        log::info!("{payload}");
        log::info!("Posting release to: {}", redact(&url));

        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| creation_failed(describe_transport_error(e, &url)))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            creation_failed(format!(
                "failed to read response: {}",
                describe_transport_error(e, &url)
            ))
        })?;

        if status != StatusCode::CREATED {
            return Err(creation_failed(describe_failure(status, &body)).into());
        }

        release
            .apply_response(&body)
            .map_err(|e| creation_failed(format!("invalid response body: {e}")))?;

        log::info!(
            "Release created with id {}",
            release.id.map_or_else(|| "<none>".to_string(), |id| id.to_string())
        );
        Ok(())
    }

    /// Describe the upload of `asset` to the release with `release_id`.
    ///
    /// Fails with `InvalidAsset` for directories, before any request is made.
    pub async fn prepare_upload(&self, release_id: u64, asset: &AssetFile) -> Result<AssetUpload> {
        let invalid = |reason: String| GitHubError::InvalidAsset {
            path: asset.path.clone(),
            reason,
        };

        let metadata = asset
            .file
            .metadata()
            .await
            .map_err(|e| invalid(format!("cannot read metadata: {e}")))?;
        if metadata.is_dir() {
            return Err(invalid("asset can't be a directory".to_string()).into());
        }

        let name = asset
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| invalid("asset path has no file name".to_string()))?;

        Ok(AssetUpload {
            url: self
                .config
                .upload_asset_url(release_id, &name)
                .map_err(|e| GitHubError::AssetUploadFailed {
                    reason: e.to_string(),
                })?,
            content_type: media_type_for(&asset.path).to_string(),
            name,
            content_length: metadata.len(),
        })
    }

    /// Stream `asset` to the release as a binary attachment.
    ///
    /// Consumes the asset, so the file is closed on every return path.
    pub async fn upload_asset(&self, release: &GitHubRelease, asset: AssetFile) -> Result<()> {
        let upload_failed = |reason: String| GitHubError::AssetUploadFailed { reason };

        let release_id = release
            .id
            .ok_or_else(|| upload_failed("release has no id assigned".to_string()))?;
        let upload = self.prepare_upload(release_id, &asset).await?;

        log::info!(
            "Posting asset {} ({}, {} bytes) to {}",
            upload.name,
            upload.content_type,
            upload.content_length,
            redact(&upload.url)
        );

        let body = Body::wrap_stream(ReaderStream::new(asset.file));
        let response = self
            .client
            .post(upload.url.clone())
            .header(CONTENT_TYPE, upload.content_type)
            .header(CONTENT_LENGTH, upload.content_length)
            .body(body)
            .send()
            .await
            .map_err(|e| upload_failed(describe_transport_error(e, &upload.url)))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.bytes().await.unwrap_or_default();
            return Err(upload_failed(describe_failure(status, &body)).into());
        }

        log::info!("Uploaded asset {}", upload.name);
        Ok(())
    }
}

/// Status line plus whatever the server said about it
fn describe_failure(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {text}")
    }
}
