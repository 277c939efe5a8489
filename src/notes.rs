//! Release notes assembled from changelog fragments

use crate::error::{NotesError, Result};
use std::path::{Path, PathBuf};

/// Delimiter between entries of the changelog file list
pub const FILE_LIST_DELIMITER: char = '|';

/// Separator written between two collected fragments
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Split a `|`-delimited file list into trimmed, non-blank paths.
pub fn parse_file_list(files: &str) -> Vec<PathBuf> {
    files
        .split(FILE_LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| {
            if item.is_empty() {
                log::debug!("Skipping blank changelog entry");
                return false;
            }
            true
        })
        .map(PathBuf::from)
        .collect()
}

/// Read one fragment. Bytes are converted lossily; encoding isn't validated.
async fn read_fragment(path: &Path) -> Result<String> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| NotesError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(String::from_utf8_lossy(&content).into_owned())
}

/// Concatenate the changelog fragments in list order.
///
/// Unreadable files are logged and skipped without taking a separator slot,
/// so the result never contains an empty section. Never fails.
pub async fn collect_release_notes(files: &str) -> String {
    let mut notes = String::new();
    let mut written = 0usize;

    for path in parse_file_list(files) {
        match read_fragment(&path).await {
            Ok(fragment) => {
                if written > 0 {
                    notes.push_str(FRAGMENT_SEPARATOR);
                }
                notes.push_str(&fragment);
                written += 1;
            }
            Err(e) => log::error!("{e}"),
        }
    }

    log::info!("Collected release notes from {written} changelog file(s)");
    notes
}
