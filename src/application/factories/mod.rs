mod publisher_factory;
mod snapshot_factory;

pub use publisher_factory::{PublisherFactory, PublisherType};
pub use snapshot_factory::{SnapshotMode, SnapshotProviderFactory};
