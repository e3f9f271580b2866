//! hostvuln - host vulnerability sweep for cloud workloads
//!
//! Takes a consistent snapshot of each volume on a host, runs an external
//! inventory scanner against it, and reconciles the installed software with
//! the known-vulnerability feed of the host's cloud resource. Matches are
//! packaged into an upload payload and handed to a publisher.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Volumes, inventory items, vulnerability
//!   records, findings, and the pure normalization/reconciliation/payload services
//! - **Application Layer** (`application`): Use cases, DTOs and adapter factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error taxonomy, result alias and path security helpers
//!
//! # Example
//!
//! ```no_run
//! use hostvuln::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = RunScanUseCase::new(
//!     PassthroughSnapshotProvider::new(),
//!     FixtureInventoryScanner::new(PathBuf::from("fixtures")),
//!     FixtureVulnerabilityFeed::new(PathBuf::from("fixtures")),
//!     FileCopyPublisher::new(PathBuf::from("findings.json")),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ScanRequest::new(
//!     vec![Volume::new("/")?],
//!     "resource-id",
//!     "subscription-id",
//!     AssetIdentifier::new("AWS", "i-0123456789abcdef0"),
//!     DEFAULT_INTEGRATION_ID.parse()?,
//! );
//! let outcome = use_case.execute(request)?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{discover_volumes, FileCopyPublisher};
    pub use crate::adapters::outbound::fixtures::FixtureVulnerabilityFeed;
    pub use crate::adapters::outbound::scanner::{FixtureInventoryScanner, ProcessInventoryScanner};
    pub use crate::adapters::outbound::snapshot::{
        PassthroughSnapshotProvider, ShadowCopySnapshotProvider,
    };
    pub use crate::application::dto::{ScanOutcome, ScanRequest};
    pub use crate::application::factories::{SnapshotMode, SnapshotProviderFactory};
    pub use crate::application::use_cases::{RunScanUseCase, ScanVolumesUseCase};
    pub use crate::inventory::domain::{
        AggregatedInventory, Application, Asset, AssetIdentifier, Finding, InventoryItem, Library,
        ScanResult, Severity, Snapshot, Volume, VulnerabilityRecord,
    };
    pub use crate::inventory::policies::VersionMatching;
    pub use crate::inventory::services::{
        PathNormalizer, PayloadBuilder, ReconciliationEngine, UploadPayload,
        DEFAULT_INTEGRATION_ID,
    };
    pub use crate::ports::outbound::{
        FindingsPublisher, InventoryScanner, ProgressReporter, SnapshotProvider, VulnerabilityFeed,
    };
    pub use crate::shared::Result;
}
