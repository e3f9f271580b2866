/// Snapshot adapters - native shadow copies and the passthrough fallback
mod passthrough;
mod shadow_copy;

pub use passthrough::PassthroughSnapshotProvider;
pub use shadow_copy::{parse_create_output, ShadowCopyInfo, ShadowCopySnapshotProvider};
