//! File operation utilities
//!
//! Streaming writes of export bodies into the project directory. Bodies land in
//! a `.part` file first and are renamed over the destination once complete, so
//! an existing export is only replaced by a fully written one.

use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::release::core::{ExportError, FileOperation, Result};

/// Destination path of an export inside the project directory
pub fn destination_path(project_path: &Path, file_name: &str) -> PathBuf {
    project_path.join(file_name)
}

/// Temporary path used while the body is still streaming
pub fn create_temp_path(dest_path: &Path) -> PathBuf {
    let mut name = dest_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest_path.with_file_name(name)
}

/// Atomically rename a temporary file to its final destination
pub async fn atomic_rename(temp_path: &Path, dest_path: &Path) -> Result<()> {
    fs::rename(temp_path, dest_path)
        .await
        .map_err(|e| ExportError::FileSystem {
            path: dest_path.to_path_buf(),
            operation: FileOperation::Move,
            source: e,
        })?;
    debug!("Atomically renamed {} to {}", temp_path.display(), dest_path.display());
    Ok(())
}

/// Stream a response body into `dest_path`, overwriting any existing file
///
/// Returns the number of bytes written. On failure the partial file is removed.
pub async fn write_stream<S, B>(url: &str, stream: S, dest_path: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ExportError::FileSystem {
                path: parent.to_path_buf(),
                operation: FileOperation::CreateDir,
                source: e,
            })?;
    }

    let temp_path = create_temp_path(dest_path);
    let mut stream = Box::pin(stream);
    let written = async {
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| ExportError::FileSystem {
                path: temp_path.clone(),
                operation: FileOperation::Create,
                source: e,
            })?;

        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ExportError::from_reqwest(url, e))?;
            let chunk = chunk.as_ref();
            file.write_all(chunk)
                .await
                .map_err(|e| ExportError::FileSystem {
                    path: temp_path.clone(),
                    operation: FileOperation::Write,
                    source: e,
                })?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| ExportError::FileSystem {
                path: temp_path.clone(),
                operation: FileOperation::Write,
                source: e,
            })?;
        file.sync_all()
            .await
            .map_err(|e| ExportError::FileSystem {
                path: temp_path.clone(),
                operation: FileOperation::Write,
                source: e,
            })?;
        // The handle must be closed before the rename
        drop(file);

        atomic_rename(&temp_path, dest_path).await?;
        Ok::<u64, ExportError>(written)
    }
    .await;

    if written.is_err() {
        discard_partial(&temp_path).await;
    }

    let written = written?;
    debug!("Wrote {} bytes to {}", written, dest_path.display());
    Ok(written)
}

async fn discard_partial(temp_path: &Path) {
    match fs::remove_file(temp_path).await {
        Ok(()) => debug!("Removed partial file {}", temp_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial file {}: {}", temp_path.display(), e),
    }
}
