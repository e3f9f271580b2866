/// Ports layer - Interface definitions
///
/// Outbound ports are implemented by adapters and injected into the
/// application use cases.
pub mod outbound;
