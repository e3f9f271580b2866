use super::wire::parse_scan_output;
use crate::inventory::domain::{ScanResult, Snapshot};
use crate::ports::outbound::InventoryScanner;
use crate::shared::error::ScanError;
use std::path::PathBuf;
use std::process::Command;

/// Placeholder replaced by the snapshot mount path in scanner arguments
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Default argument template for the scanner's directory mode
pub const DEFAULT_SCANNER_ARGS: &[&str] = &["dir", "scan", "--path", PATH_PLACEHOLDER, "--format", "json"];

/// ProcessInventoryScanner adapter - spawns the external scanner binary
///
/// Every argument equal to or containing `{path}` has it replaced by the mount
/// path. The process is waited on synchronously; stdout must hold the JSON
/// document.
pub struct ProcessInventoryScanner {
    scanner_path: PathBuf,
    args: Vec<String>,
}

impl ProcessInventoryScanner {
    pub fn new(scanner_path: PathBuf) -> Self {
        Self {
            scanner_path,
            args: DEFAULT_SCANNER_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn render_args(&self, mount_path: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, mount_path))
            .collect()
    }
}

impl InventoryScanner for ProcessInventoryScanner {
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError> {
        let mount_path = snapshot.mount_path();
        let args = self.render_args(&mount_path.to_string_lossy());

        tracing::info!(scanner = %self.scanner_path.display(), mount_path = %mount_path.display(), "Running inventory scanner");
        let output = Command::new(&self.scanner_path)
            .args(&args)
            .output()
            .map_err(|source| ScanError::Launch {
                scanner: self.scanner_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScanError::NonZeroExit {
                mount_path: mount_path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let result =
            parse_scan_output(&output.stdout).map_err(|source| ScanError::MalformedOutput {
                mount_path: mount_path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            libraries = result.libraries.len(),
            applications = result.applications.len(),
            "Scanner output parsed"
        );
        Ok(result)
    }
}
