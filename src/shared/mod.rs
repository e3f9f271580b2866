/// Shared kernel - error taxonomy, result alias and path security helpers
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
