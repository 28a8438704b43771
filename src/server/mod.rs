//! Server core functionality
//!
//! HTTP listener setup, routing, and the per-verb request handlers.

pub mod core;
pub mod handlers;

pub use core::Server;
