pub mod config;
pub mod error;
pub mod logging;
pub mod preflight;
pub mod select;

// Internal modules - not part of public API
pub(crate) mod progress;
pub(crate) mod stats;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
