//! Image upload: local file to `data:` URL.
//!
//! The read is asynchronous and resolves once. The receiving state is held
//! through a `Weak` so an upload that finishes after its card was dropped
//! does nothing. Failures are logged and leave the target untouched.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, Weak};

use base64::Engine;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not an image: {0}")]
    UnsupportedType(PathBuf),
    #[error("upload target no longer exists")]
    Unmounted,
}

/// MIME type for an image file, by extension.
#[must_use]
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Encode bytes as a `data:<mime>;base64,...` URL.
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Read an image file as a data URL.
///
/// # Errors
///
/// [`UploadError::UnsupportedType`] for non-image extensions,
/// [`UploadError::Io`] when the file can't be read.
pub async fn read_as_data_url(path: &Path) -> Result<String, UploadError> {
    let mime = image_mime(path).ok_or_else(|| UploadError::UnsupportedType(path.to_path_buf()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadError::Io { path: path.to_path_buf(), source })?;
    Ok(data_url(mime, &bytes))
}

/// Read `path` and hand the data URL to `apply` if `target` is still alive.
///
/// # Errors
///
/// Any read error, or [`UploadError::Unmounted`] when the target was
/// dropped before the read finished.
pub async fn upload_into<T, F>(target: &Weak<Mutex<T>>, path: &Path, apply: F) -> Result<(), UploadError>
where
    F: FnOnce(&mut T, String),
{
    let url = read_as_data_url(path).await?;
    let target = target.upgrade().ok_or(UploadError::Unmounted)?;
    let mut guard = target.lock().unwrap_or_else(PoisonError::into_inner);
    apply(&mut guard, url);
    Ok(())
}

/// Fire-and-forget [`upload_into`]. Never surfaces an error to the caller.
pub fn spawn_image_upload<T, F>(target: Weak<Mutex<T>>, path: PathBuf, apply: F) -> JoinHandle<()>
where
    T: Send + 'static,
    F: FnOnce(&mut T, String) + Send + 'static,
{
    tokio::spawn(async move {
        match upload_into(&target, &path, apply).await {
            Ok(()) => info!(path = %path.display(), "image uploaded"),
            Err(UploadError::Unmounted) => debug!(path = %path.display(), "upload finished after target dropped"),
            Err(e) => error!(error = %e, "image upload failed"),
        }
    })
}
