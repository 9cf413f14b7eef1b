// Public modules
pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod locate;
pub mod props;
pub mod scan;
pub mod sync;
pub mod workspace;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
