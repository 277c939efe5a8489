//! Release record exchanged with the GitHub releases API

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A GitHub release, both as create request and as server response.
///
/// Built locally without `id`, `upload_url` and `html_url`; those are filled
/// in from the create response via [`GitHubRelease::apply`]. Empty strings,
/// `false` flags and the missing id are left out of the request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRelease {
    /// Server-assigned release ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Tag the release is attached to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_name: String,
    /// Display name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Commit, branch or tag the release is anchored to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_commitish: String,
    /// Release notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Unpublished draft
    #[serde(default, skip_serializing_if = "is_false")]
    pub draft: bool,
    /// Marked as prerelease
    #[serde(default, skip_serializing_if = "is_false")]
    pub prerelease: bool,
    /// Asset upload URL template (set by the API)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub upload_url: String,
    /// Human-facing release page (set by the API)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_url: String,
}

/// Fields of a create-release response. Absent fields leave the local
/// record untouched.
#[allow(missing_docs)] // Mirrors GitHubRelease field for field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseUpdate {
    pub id: Option<u64>,
    pub tag_name: Option<String>,
    pub name: Option<String>,
    pub target_commitish: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
    pub upload_url: Option<String>,
    pub html_url: Option<String>,
}

impl GitHubRelease {
    /// Build the local (not yet identified) release.
    pub fn new(
        tag_name: impl Into<String>,
        name: impl Into<String>,
        target_commitish: impl Into<String>,
        body: impl Into<String>,
        draft: bool,
        prerelease: bool,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: name.into(),
            target_commitish: target_commitish.into(),
            body: body.into(),
            draft,
            prerelease,
            ..Self::default()
        }
    }

    /// Overwrite fields with the values present in a server response.
    pub fn apply(&mut self, update: ReleaseUpdate) {
        if let Some(id) = update.id {
            self.id = Some(id);
        }
        if let Some(tag_name) = update.tag_name {
            self.tag_name = tag_name;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(target_commitish) = update.target_commitish {
            self.target_commitish = target_commitish;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(draft) = update.draft {
            self.draft = draft;
        }
        if let Some(prerelease) = update.prerelease {
            self.prerelease = prerelease;
        }
        if let Some(upload_url) = update.upload_url {
            self.upload_url = upload_url;
        }
        if let Some(html_url) = update.html_url {
            self.html_url = html_url;
        }
    }

    /// Decode a create-release response body and apply it in place.
    pub fn apply_response(&mut self, body: &[u8]) -> serde_json::Result<()> {
        let update: ReleaseUpdate = serde_json::from_slice(body)?;
        self.apply(update);
        Ok(())
    }
}
