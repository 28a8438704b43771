//! HTTP verb handlers
//!
//! Implements the PUT/GET/HEAD/DELETE semantics against the storage root.
//! Each handler resolves the request path, performs its filesystem
//! operation, records an audit line for the completed operation, and builds
//! the response. Errors map to responses via `StorageError::into_response`.

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use futures_util::StreamExt;
use httpdate::fmt_http_date;
use std::io;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::StorageError;
use crate::server::core::AppState;
use crate::storage::operations::{self, EntryKind, Removed};
use crate::storage::resolve_request_path;

/// The root route has no path parameter; treat it as the empty request path.
fn request_path(filepath: Option<UrlPath<String>>) -> String {
    filepath.map(|UrlPath(path)| path).unwrap_or_default()
}

/// PUT: streams the request body into the file at the resolved path,
/// creating missing parent directories and truncating any existing file.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    UrlPath(request_path): UrlPath<String>,
    body: Body,
) -> Result<Response, StorageError> {
    let resolved = resolve_request_path(&state.storage_root, &request_path)?;

    let mut file = operations::prepare_upload(&resolved).await?;
    let mut stream = body.into_data_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    state.audit.record("PUT", &request_path).await;
    Ok((StatusCode::OK, "File uploaded").into_response())
}

/// GET: a regular file streams back with a generic binary content type; a
/// directory returns a JSON array of its immediate child file names;
/// anything else is not found.
pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    filepath: Option<UrlPath<String>>,
) -> Result<Response, StorageError> {
    let request_path = request_path(filepath);
    let resolved = resolve_request_path(&state.storage_root, &request_path)?;

    match operations::classify(&resolved).await {
        EntryKind::File => {
            let file = fs::File::open(&resolved).await?;
            state.audit.record("GET", &request_path).await;
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/octet-stream")],
                Body::from_stream(ReaderStream::new(file)),
            )
                .into_response())
        }
        EntryKind::Directory => {
            let names = operations::list_directory(&resolved).await?;
            state.audit.record("GET-DIR", &request_path).await;
            Ok(Json(names).into_response())
        }
        EntryKind::Missing => Err(StorageError::NotFound(request_path)),
    }
}

/// HEAD: reports size and last-modification time of a regular file as
/// response headers, with no body. Directories are not inspectable.
pub async fn inspect(
    State(state): State<Arc<AppState>>,
    filepath: Option<UrlPath<String>>,
) -> Result<Response, StorageError> {
    let request_path = request_path(filepath);
    let resolved = resolve_request_path(&state.storage_root, &request_path)?;

    let info = operations::file_info(&resolved).await?;

    state.audit.record("HEAD", &request_path).await;
    Ok((
        StatusCode::OK,
        [
            ("File-Size", info.size.to_string()),
            ("Last-Modified", fmt_http_date(info.modified)),
        ],
    )
        .into_response())
}

/// DELETE: a regular file is unlinked; a directory is removed recursively
/// with all of its contents; anything else is not found.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    UrlPath(request_path): UrlPath<String>,
) -> Result<Response, StorageError> {
    let resolved = resolve_request_path(&state.storage_root, &request_path)?;

    match operations::delete_entry(&resolved).await? {
        Removed::File => {
            state.audit.record("DELETE-FILE", &request_path).await;
            Ok((StatusCode::OK, "File deleted").into_response())
        }
        Removed::Directory => {
            state.audit.record("DELETE-DIR", &request_path).await;
            Ok((StatusCode::OK, "Directory deleted").into_response())
        }
    }
}
