//! GitHub integration for release operations

mod client;
mod endpoints;
mod release;

pub use client::{
    AssetFile, AssetUpload, DEFAULT_MEDIA_TYPE, GitHubReleaseManager, build_http_client,
    describe_transport_error, media_type_for,
};
pub use endpoints::{DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL, GitHubApiConfig, redact};
pub use release::{GitHubRelease, ReleaseUpdate};
