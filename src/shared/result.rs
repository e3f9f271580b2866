/// Application-level result type; component boundaries use the typed errors in
/// [`crate::shared::error`] and convert into `anyhow::Error` here.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
