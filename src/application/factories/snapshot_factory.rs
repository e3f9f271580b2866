use crate::adapters::outbound::snapshot::{PassthroughSnapshotProvider, ShadowCopySnapshotProvider};
use crate::ports::outbound::SnapshotProvider;
use std::path::PathBuf;

/// Snapshot capability requested by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotMode {
    /// Native shadow copies on Windows, passthrough elsewhere (default)
    #[default]
    Auto,
    /// Always use native shadow copies
    Native,
    /// Scan the live volume without a snapshot
    Passthrough,
}

impl SnapshotMode {
    /// Resolves `Auto` against the host platform.
    pub fn resolve(self) -> SnapshotMode {
        match self {
            SnapshotMode::Auto if cfg!(windows) => SnapshotMode::Native,
            SnapshotMode::Auto => SnapshotMode::Passthrough,
            other => other,
        }
    }
}

impl std::str::FromStr for SnapshotMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SnapshotMode::Auto),
            "native" | "vss" => Ok(SnapshotMode::Native),
            "passthrough" | "none" => Ok(SnapshotMode::Passthrough),
            _ => Err(format!(
                "Invalid snapshot mode: {}. Please specify 'auto', 'native' or 'passthrough'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SnapshotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotMode::Auto => write!(f, "auto"),
            SnapshotMode::Native => write!(f, "native"),
            SnapshotMode::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// Factory for creating snapshot providers
///
/// The pipeline only ever sees the [`SnapshotProvider`] capability; which
/// implementation backs it is decided here, once, from [`SnapshotMode`].
pub struct SnapshotProviderFactory;

impl SnapshotProviderFactory {
    /// Creates a snapshot provider for the specified mode
    ///
    /// # Arguments
    /// * `mode` - Requested snapshot capability
    /// * `mount_root` - Run-unique directory that receives native snapshot links
    ///
    /// # Examples
    /// ```
    /// use hostvuln::application::factories::{SnapshotMode, SnapshotProviderFactory};
    ///
    /// let provider = SnapshotProviderFactory::create(
    ///     SnapshotMode::Passthrough,
    ///     std::env::temp_dir().join("hostvuln-mnt"),
    /// );
    /// ```
    pub fn create(mode: SnapshotMode, mount_root: PathBuf) -> Box<dyn SnapshotProvider> {
        match mode.resolve() {
            SnapshotMode::Native => Box::new(ShadowCopySnapshotProvider::new(mount_root)),
            _ => Box::new(PassthroughSnapshotProvider::new()),
        }
    }
}
