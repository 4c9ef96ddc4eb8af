//! Uploaded image storage.
//!
//! Admin uploads (menu item photos, gallery images) are written under
//! the configured uploads directory with random hex filenames. Images
//! are re-encoded and bounded to a maximum dimension via the `image`
//! crate; if decoding fails the original bytes are stored as-is rather
//! than failing the upload.

use std::path::{Path, PathBuf};

use rand::RngCore;
use tavola_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// File extensions accepted for image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Maximum bounding box for menu item photos.
pub const MENU_IMAGE_SIZE: (u32, u32) = (800, 800);

/// Maximum bounding box for gallery photos.
pub const GALLERY_IMAGE_SIZE: (u32, u32) = (1200, 800);

/// Maximum bounding box for event photos.
pub const EVENT_IMAGE_SIZE: (u32, u32) = (1200, 800);

/// Generate a random lowercase hex string of `2 * n_bytes` characters.
fn random_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Extract and validate the lowercase extension of an uploaded filename.
fn validated_extension(filename: &str) -> AppResult<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported image type '{ext}'. Allowed: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        ))));
    }
    Ok(ext)
}

/// Store an uploaded image, returning its path relative to the uploads
/// directory (e.g. `menu/3fa9c1d207b4e5f6.jpg`).
///
/// The image is resized to fit within `max_size` (aspect ratio kept) and
/// re-encoded. Decode failures fall back to writing the original bytes.
pub async fn save_image(
    uploads_dir: &Path,
    folder: &str,
    original_filename: &str,
    bytes: Vec<u8>,
    max_size: (u32, u32),
) -> AppResult<String> {
    let ext = validated_extension(original_filename)?;
    let filename = format!("{}.{ext}", random_hex(8));
    let relative = format!("{folder}/{filename}");

    let folder_path = uploads_dir.join(folder);
    tokio::fs::create_dir_all(&folder_path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload folder: {e}")))?;

    let target: PathBuf = folder_path.join(&filename);
    let written = tokio::task::spawn_blocking(move || write_resized(&target, &bytes, max_size))
        .await
        .map_err(|e| AppError::InternalError(format!("Image task failed: {e}")))?;
    written.map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    Ok(relative)
}

/// Decode, bound, and re-encode the image at `target`; fall back to the
/// raw bytes when the payload is not decodable.
fn write_resized(target: &Path, bytes: &[u8], max_size: (u32, u32)) -> std::io::Result<()> {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let bounded = img.thumbnail(max_size.0, max_size.1);
            bounded
                .save(target)
                .map_err(|e| std::io::Error::other(format!("encode failed: {e}")))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Image decode failed; storing original bytes");
            std::fs::write(target, bytes)
        }
    }
}

/// Remove a previously stored image. Best-effort: failures are logged,
/// never propagated, so a missing file cannot block entity deletion.
pub async fn delete_image(uploads_dir: &Path, relative_path: &str) {
    // Refuse anything that could escape the uploads directory.
    if relative_path.contains("..") || relative_path.starts_with('/') {
        tracing::warn!(path = relative_path, "Refusing suspicious image path");
        return;
    }

    let full_path = uploads_dir.join(relative_path);
    if let Err(e) = tokio::fs::remove_file(&full_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::error!(path = %full_path.display(), error = %e, "Failed to delete image");
        }
    }
}
