pub mod finding;
pub mod inventory_item;
pub mod volume;
pub mod vulnerability;

pub use finding::{Asset, AssetIdentifier, Finding};
pub use inventory_item::{AggregatedInventory, Application, InventoryItem, Library, ScanResult};
pub use volume::{Snapshot, Volume};
pub use vulnerability::{Severity, VulnerabilityRecord};
