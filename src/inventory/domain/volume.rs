use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Volume value object - a scan target identified by its platform root path
///
/// The root is kept as text (`C:\`, `/`, `/mnt/data`) because library paths
/// are rebuilt against it by string concatenation, independent of the host OS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Volume {
    root: String,
}

impl Volume {
    pub fn new(root: impl Into<String>) -> Result<Self> {
        let root = root.into();
        if root.trim().is_empty() {
            anyhow::bail!("Volume root cannot be empty");
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.root)
    }

    /// Filesystem-safe key for per-volume artifacts (`C:\` -> `C`, `/` -> `root`).
    pub fn key(&self) -> String {
        let key: String = self
            .root
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '/' || *c == '\\')
            .collect::<String>()
            .split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        if key.is_empty() {
            "root".to_string()
        } else {
            key
        }
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Snapshot - ephemeral, read-only view of a [`Volume`]
///
/// A passthrough snapshot mounts at the volume itself and has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    origin: Volume,
    mount_path: PathBuf,
    snapshot_id: Option<String>,
}

impl Snapshot {
    pub fn new(origin: Volume, mount_path: PathBuf, snapshot_id: Option<String>) -> Self {
        Self {
            origin,
            mount_path,
            snapshot_id,
        }
    }

    /// Identity snapshot used on platforms without native snapshotting.
    pub fn passthrough(origin: Volume) -> Self {
        let mount_path = origin.as_path().to_path_buf();
        Self {
            origin,
            mount_path,
            snapshot_id: None,
        }
    }

    pub fn origin(&self) -> &Volume {
        &self.origin
    }

    pub fn mount_path(&self) -> &Path {
        &self.mount_path
    }

    pub fn snapshot_id(&self) -> Option<&str> {
        self.snapshot_id.as_deref()
    }

    pub fn is_passthrough(&self) -> bool {
        self.snapshot_id.is_none()
    }
}
