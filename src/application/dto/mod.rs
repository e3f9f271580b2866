/// Data Transfer Objects for application layer
///
/// DTOs carry run inputs in and run summaries out, keeping the domain layer
/// isolated from configuration and presentation.
mod scan_outcome;
mod scan_request;

pub use scan_outcome::{ScanOutcome, SkippedVolume, VolumeScanReport};
pub use scan_request::ScanRequest;
