/// Saving the try-on result to disk
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::media::DataUrl;

/// File name for a result saved at `now`: `tryon-result-<unix-millis>.png`
pub fn result_filename(now: DateTime<Utc>) -> String {
    format!("tryon-result-{}.png", now.timestamp_millis())
}

/// Where downloads go: the user's download directory, else home, else cwd
pub fn get_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Decode the result image and write it into `dir`.
/// Returns the path of the written file.
pub async fn save_result(image: DataUrl, dir: PathBuf) -> Result<PathBuf, String> {
    let bytes = image
        .decode()
        .map_err(|e| format!("Could not decode result image: {}", e))?;

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

    let (path, mut file) = create_unique(&dir, Utc::now()).await?;
    file.write_all(&bytes)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    file.flush()
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    tracing::info!(path = %path.display(), size = bytes.len(), "saved try-on result");
    Ok(path)
}

/// Atomically claim a fresh file name. Concurrent downloads in the same
/// millisecond each get their own file; the timestamp is bumped on collision.
async fn create_unique(dir: &Path, now: DateTime<Utc>) -> Result<(PathBuf, tokio::fs::File), String> {
    let mut at = now;
    loop {
        let path = dir.join(result_filename(at));
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                at += chrono::Duration::milliseconds(1);
            }
            Err(e) => return Err(format!("Failed to create {}: {}", path.display(), e)),
        }
    }
}
