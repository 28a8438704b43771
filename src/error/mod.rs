//! Error handling
//!
//! Defines error types and HTTP response mapping for the stash server.

pub mod handlers;
pub mod types;

pub use handlers::error_to_status;
pub use types::StorageError;
