/// Picked file -> data URL conversion
///
/// The size check runs against file metadata before any bytes are read, so
/// an oversized photo never reaches memory or image state.

use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::media::DataUrl;

/// Upload limit for person and clothing images
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Reject files above the upload limit
pub fn check_size(size: u64) -> Result<(), IngestError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(IngestError::TooLarge { size });
    }
    Ok(())
}

/// Read an image file asynchronously and encode it as a data URL
pub async fn load_image_as_data_url(path: PathBuf) -> Result<DataUrl, IngestError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| IngestError::Io(format!("{}: {}", path.display(), e)))?;
    check_size(metadata.len())?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| IngestError::Io(format!("{}: {}", path.display(), e)))?;

    let data_url = DataUrl::from_image_bytes(&bytes, extension_of(&path))
        .ok_or(IngestError::UnknownFormat)?;

    tracing::debug!(path = %path.display(), size = bytes.len(), mime = data_url.mime(), "image ingested");
    Ok(data_url)
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(check_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            check_size(MAX_UPLOAD_BYTES + 1),
            Err(IngestError::TooLarge { size }) if size == MAX_UPLOAD_BYTES + 1
        ));
    }

    #[tokio::test]
    async fn test_loads_small_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let url = load_image_as_data_url(path).await.unwrap();
        assert_eq!(url.mime(), "image/png");
    }

    #[tokio::test]
    async fn test_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = std::fs::File::create(&path).unwrap();
        // Sparse file: metadata reports the size without writing 10MB
        file.set_len(MAX_UPLOAD_BYTES + 1).unwrap();

        let result = load_image_as_data_url(path).await;
        assert!(matches!(result, Err(IngestError::TooLarge { .. })));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_image_as_data_url(PathBuf::from("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
