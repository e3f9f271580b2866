use crate::ports::outbound::FindingsPublisher;
use crate::shared::error::PublishError;
use crate::shared::security::validate_not_symlink;
use std::fs;
use std::path::{Path, PathBuf};

/// FileCopyPublisher adapter for offline runs
///
/// Publishes by copying the staged payload to a fixed output path instead of
/// uploading it.
pub struct FileCopyPublisher {
    output_path: PathBuf,
}

impl FileCopyPublisher {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn destination_error(&self, details: impl Into<String>) -> PublishError {
        PublishError::Destination {
            path: self.output_path.clone(),
            details: details.into(),
        }
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<(), PublishError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(self.destination_error(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symbolic link
    fn validate_output_security(&self) -> Result<(), PublishError> {
        validate_not_symlink(&self.output_path, "write")
            .map_err(|e| self.destination_error(e.to_string()))
    }
}

impl FindingsPublisher for FileCopyPublisher {
    fn publish(&self, payload_path: &Path) -> Result<(), PublishError> {
        self.validate_parent_directory()?;
        self.validate_output_security()?;

        fs::copy(payload_path, &self.output_path)
            .map_err(|e| self.destination_error(e.to_string()))?;

        tracing::info!(output = %self.output_path.display(), "Payload written");
        Ok(())
    }
}
