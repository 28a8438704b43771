//! File system storage management
//!
//! Request path resolution and the filesystem operations behind each verb.

pub mod operations;
pub mod validation;

pub use validation::resolve_request_path;
