pub mod operations;
pub mod runner;
pub mod status;
pub mod update;

// Public API
pub mod api;

// Re-export commonly used items
pub use api::*;
