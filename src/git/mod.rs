pub mod operations;
pub mod probe;
pub mod status;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
