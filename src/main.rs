//! Stash Server - Entry Point
//!
//! A small HTTP file-storage server: PUT uploads, GET retrieves files or
//! lists directories, HEAD reports file metadata, DELETE removes files or
//! whole directory trees under a single storage root.

use log::{error, info};

use stash_server::Server;
use stash_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching stash server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config).await;
    server.start().await;
}
