//! Storage operations
//!
//! Filesystem operations behind the HTTP verbs: upload, retrieve, list,
//! inspect, and delete. The filesystem is the single source of truth; no
//! state is cached between requests, and every operation is attempted
//! exactly once.

use log::info;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;

use crate::error::StorageError;

/// What a resolved path points at on disk
#[derive(Debug)]
pub enum EntryKind {
    File,
    Directory,
    Missing,
}

/// What a delete operation removed
#[derive(Debug)]
pub enum Removed {
    File,
    Directory,
}

/// File metadata reported by HEAD
#[derive(Debug)]
pub struct FileInfo {
    pub size: u64,
    pub modified: SystemTime,
}

/// Classifies the entry at a resolved path.
pub async fn classify(path: &Path) -> EntryKind {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => EntryKind::File,
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        _ => EntryKind::Missing,
    }
}

/// Prepares a file for upload: creates any missing parent directories and
/// opens the target for writing, truncating an existing file at that path.
pub async fn prepare_upload(path: &Path) -> Result<fs::File, StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let file = fs::File::create(path).await?;
    Ok(file)
}

/// Lists the immediate child files of a directory.
///
/// Subdirectories are not included in listings. Names are sorted so the
/// result is deterministic across platforms.
pub async fn list_directory(path: &Path) -> Result<Vec<String>, StorageError> {
    let mut entries = fs::read_dir(path).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if meta.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();

    info!("Listed directory {} - {} files", path.display(), names.len());

    Ok(names)
}

/// Returns size and last-modification time of a regular file.
///
/// Directories are not inspectable; anything but a regular file reports
/// as not found.
pub async fn file_info(path: &Path) -> Result<FileInfo, StorageError> {
    let meta = match fs::metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(StorageError::from(e)),
    };

    if !meta.is_file() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }

    let modified = meta.modified()?;

    Ok(FileInfo {
        size: meta.len(),
        modified,
    })
}

/// Deletes the entry at a resolved path: a regular file is unlinked, a
/// directory is removed recursively with all of its contents. Destructive
/// and non-reversible.
pub async fn delete_entry(path: &Path) -> Result<Removed, StorageError> {
    match classify(path).await {
        EntryKind::File => {
            fs::remove_file(path).await?;
            info!("Deleted file {}", path.display());
            Ok(Removed::File)
        }
        EntryKind::Directory => {
            fs::remove_dir_all(path).await?;
            info!("Deleted directory {}", path.display());
            Ok(Removed::Directory)
        }
        EntryKind::Missing => Err(StorageError::NotFound(path.display().to_string())),
    }
}
