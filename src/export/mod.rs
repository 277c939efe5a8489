//! Exposing step outputs to later pipeline steps

use crate::error::{ExportError, Result};

/// Output key holding the release page URL
pub const RELEASE_URL_KEY: &str = "RELEASE_URL";

/// Destination for step outputs
pub trait OutputExporter {
    /// Expose `value` under `key`.
    fn export(&self, key: &str, value: &str) -> impl Future<Output = Result<()>>;
}

/// Exports through `bitrise envman add --key KEY --value VALUE`
#[derive(Debug, Clone)]
pub struct EnvmanExporter {
    program: String,
}

impl Default for EnvmanExporter {
    fn default() -> Self {
        Self {
            program: "bitrise".to_string(),
        }
    }
}

impl EnvmanExporter {
    /// Exporter that runs `program` instead of `bitrise`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl OutputExporter for EnvmanExporter {
    async fn export(&self, key: &str, value: &str) -> Result<()> {
        let failed = |reason: String| ExportError::Failed {
            key: key.to_string(),
            reason,
        };

        let output = tokio::process::Command::new(&self.program)
            .args(["envman", "add", "--key", key, "--value", value])
            .output()
            .await
            .map_err(|e| failed(format!("could not run {}: {e}", self.program)))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(failed(format!("{} | output: {}", output.status, combined.trim())).into());
        }

        log::info!("Exposed {key}={value}");
        Ok(())
    }
}
