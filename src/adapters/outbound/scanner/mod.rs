/// Scanner adapters - the external scanner process and its fixture stand-ins
mod fixture_scanner;
mod process_scanner;
mod recording_scanner;
mod wire;

pub use fixture_scanner::{scan_fixture_name, FixtureInventoryScanner};
pub use process_scanner::{ProcessInventoryScanner, DEFAULT_SCANNER_ARGS, PATH_PLACEHOLDER};
pub use recording_scanner::RecordingInventoryScanner;
pub use wire::{parse_scan_output, ScanDocument};
