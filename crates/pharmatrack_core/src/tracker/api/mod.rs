//! Request and response types shared by the tracker services.

pub mod types;

// Re-export all types for convenience
pub use types::*;
