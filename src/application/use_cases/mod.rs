/// Use cases module containing application business logic orchestration
mod run_scan;
mod scan_volumes;

pub use run_scan::RunScanUseCase;
pub use scan_volumes::ScanVolumesUseCase;
