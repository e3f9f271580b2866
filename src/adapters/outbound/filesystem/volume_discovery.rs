use crate::inventory::domain::Volume;
use crate::shared::Result;
use std::path::Path;

/// Lists the volumes to scan when none are configured
///
/// On Windows every drive letter whose root exists, in letter order.
/// Elsewhere the filesystem root.
pub fn discover_volumes() -> Result<Vec<Volume>> {
    let roots = if cfg!(windows) {
        drive_roots(|root| Path::new(root).exists())
    } else {
        vec!["/".to_string()]
    };

    if roots.is_empty() {
        anyhow::bail!("No volumes found to scan");
    }
    roots.into_iter().map(Volume::new).collect()
}

fn drive_roots(exists: impl Fn(&str) -> bool) -> Vec<String> {
    ('A'..='Z')
        .map(|letter| format!("{}:\\", letter))
        .filter(|root| exists(root))
        .collect()
}
