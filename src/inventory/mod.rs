/// Inventory domain - volumes, installed software, known vulnerabilities and
/// the pure services that turn them into findings
pub mod domain;
pub mod policies;
pub mod services;
