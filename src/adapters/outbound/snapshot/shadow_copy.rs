use crate::inventory::domain::{Snapshot, Volume};
use crate::ports::outbound::SnapshotProvider;
use crate::shared::error::SnapshotError;
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SHADOW_ID_LABEL: &str = "Shadow Copy ID:";
const SHADOW_DEVICE_LABEL: &str = "Shadow Copy Volume Name:";

/// Identifiers reported by `vssadmin create shadow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowCopyInfo {
    pub shadow_id: String,
    pub device_path: String,
}

/// ShadowCopySnapshotProvider adapter for Windows Volume Shadow Copy
///
/// Each acquire creates a shadow copy of the volume and exposes it through a
/// directory link under `mount_root`. The mount root is expected to be unique
/// per run and every acquire gets its own link name, so two snapshots never
/// share a mount path.
pub struct ShadowCopySnapshotProvider {
    mount_root: PathBuf,
    sequence: Cell<usize>,
}

impl ShadowCopySnapshotProvider {
    pub fn new(mount_root: PathBuf) -> Self {
        Self {
            mount_root,
            sequence: Cell::new(0),
        }
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    fn next_mount_path(&self, volume: &Volume) -> PathBuf {
        let sequence = self.sequence.get();
        self.sequence.set(sequence + 1);
        self.mount_root
            .join(format!("{}-{}", volume.key(), sequence))
    }

    fn create_shadow(&self, volume: &Volume) -> Result<ShadowCopyInfo, String> {
        let output = run("vssadmin", &["create", "shadow", &format!("/for={}", volume.root())])
            .map_err(|e| format!("failed to start vssadmin: {}", e))?;
        check_status("vssadmin create shadow", &output)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_create_output(&stdout)
            .ok_or_else(|| format!("could not find shadow copy identifiers in vssadmin output:\n{}", stdout.trim()))
    }

    fn delete_shadow(&self, shadow_id: &str) -> Result<(), String> {
        let output = run(
            "vssadmin",
            &["delete", "shadows", &format!("/shadow={}", shadow_id), "/quiet"],
        )
        .map_err(|e| format!("failed to start vssadmin: {}", e))?;
        check_status("vssadmin delete shadows", &output)
    }

    fn link(&self, mount_path: &Path, device_path: &str) -> Result<(), String> {
        fs::create_dir_all(&self.mount_root).map_err(|e| {
            format!(
                "failed to create mount directory {}: {}",
                self.mount_root.display(),
                e
            )
        })?;

        let target = link_target(device_path);
        let mount = mount_path.to_string_lossy();
        let output = run("cmd", &["/c", "mklink", "/d", mount.as_ref(), &target])
            .map_err(|e| format!("failed to start mklink: {}", e))?;
        check_status("mklink", &output)
    }
}

impl SnapshotProvider for ShadowCopySnapshotProvider {
    fn acquire(&self, volume: &Volume) -> Result<Snapshot, SnapshotError> {
        let shadow = self
            .create_shadow(volume)
            .map_err(|details| SnapshotError::Create {
                volume: volume.as_path().to_path_buf(),
                partial_mount: None,
                details,
            })?;
        tracing::debug!(volume = %volume, shadow_id = %shadow.shadow_id, device = %shadow.device_path, "Shadow copy created");

        let mount_path = self.next_mount_path(volume);
        if let Err(details) = self.link(&mount_path, &shadow.device_path) {
            if let Err(e) = self.delete_shadow(&shadow.shadow_id) {
                tracing::warn!(shadow_id = %shadow.shadow_id, error = %e, "Failed to delete shadow copy after link failure");
            }
            return Err(SnapshotError::Create {
                volume: volume.as_path().to_path_buf(),
                partial_mount: Some(mount_path),
                details,
            });
        }

        Ok(Snapshot::new(volume.clone(), mount_path, Some(shadow.shadow_id)))
    }

    fn release(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let Some(shadow_id) = snapshot.snapshot_id() else {
            return Ok(());
        };
        let release_error = |details: String| SnapshotError::Release {
            mount_path: snapshot.mount_path().to_path_buf(),
            snapshot_id: shadow_id.to_string(),
            details,
        };

        let unlink = remove_link(snapshot.mount_path());
        self.delete_shadow(shadow_id).map_err(release_error)?;
        unlink.map_err(|e| {
            release_error(format!(
                "failed to remove mount link {}: {}",
                snapshot.mount_path().display(),
                e
            ))
        })
    }

    fn discard_partial(&self, mount_path: &Path) -> Result<(), SnapshotError> {
        remove_link(mount_path).map_err(|e| SnapshotError::Release {
            mount_path: mount_path.to_path_buf(),
            snapshot_id: String::new(),
            details: format!("failed to remove partial mount link: {}", e),
        })
    }
}

fn run(program: &str, args: &[&str]) -> io::Result<Output> {
    tracing::debug!(program, ?args, "Running command");
    Command::new(program).args(args).output()
}

fn check_status(what: &str, output: &Output) -> Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    Err(format!(
        "{} exited with {}: {}{}",
        what,
        output.status,
        String::from_utf8_lossy(&output.stdout).trim(),
        String::from_utf8_lossy(&output.stderr).trim()
    ))
}

/// Removes a directory link; a link that is already gone is not an error.
fn remove_link(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => fs::remove_dir(path).or_else(|_| fs::remove_file(path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Device paths must end with a separator for the link to open as a directory.
fn link_target(device_path: &str) -> String {
    if device_path.ends_with('\\') {
        device_path.to_string()
    } else {
        format!("{}\\", device_path)
    }
}

/// Extracts the shadow id and device path from `vssadmin create shadow` output.
pub fn parse_create_output(stdout: &str) -> Option<ShadowCopyInfo> {
    let mut shadow_id = None;
    let mut device_path = None;

    for line in stdout.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix(SHADOW_ID_LABEL) {
            shadow_id = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(SHADOW_DEVICE_LABEL) {
            device_path = Some(value.trim().to_string());
        }
    }

    match (shadow_id, device_path) {
        (Some(shadow_id), Some(device_path)) if !shadow_id.is_empty() && !device_path.is_empty() => {
            Some(ShadowCopyInfo {
                shadow_id,
                device_path,
            })
        }
        _ => None,
    }
}
