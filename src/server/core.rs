use axum::Router;
use axum::routing::get;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::audit::AuditLogger;
use crate::config::ServerConfig;
use crate::server::handlers;

/// Shared state handed to every request handler. Read-only after startup
/// apart from the audit sink, which serializes its own appends.
pub struct AppState {
    pub storage_root: PathBuf,
    pub audit: AuditLogger,
}

pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.socket_addr();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        let storage_root = config.storage_root_path();
        if let Err(e) = std::fs::create_dir_all(&storage_root) {
            error!(
                "Failed to create storage root {}: {}",
                storage_root.display(),
                e
            );
            panic!("Server startup failed: storage root unavailable: {}", e);
        }
        info!("Storage root: {}", storage_root.display());

        let log_file = config.log_file_path();
        let audit = match AuditLogger::open(&log_file).await {
            Ok(audit) => {
                info!("Audit log: {}", log_file.display());
                audit
            }
            Err(e) => {
                error!("Failed to open audit log {}: {}", log_file.display(), e);
                panic!("Server startup failed: audit log unavailable: {}", e);
            }
        };

        let state = Arc::new(AppState {
            storage_root,
            audit,
        });

        Self {
            listener,
            router: build_router(state),
        }
    }

    pub async fn start(self) {
        info!("Starting stash server");

        if let Err(e) = axum::serve(self.listener, self.router).await {
            error!("Server error: {}", e);
        }
    }
}

/// Builds the application router.
///
/// Every nested path maps onto the same four verb handlers. The bare root
/// path supports GET (listing) and HEAD only, so the storage root itself
/// cannot be replaced or deleted over HTTP.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::retrieve).head(handlers::inspect))
        .route(
            "/{*filepath}",
            get(handlers::retrieve)
                .head(handlers::inspect)
                .put(handlers::upload)
                .delete(handlers::remove),
        )
        .with_state(state)
}
