//! Image materialization: download a source image, re-host it in the
//! store's file bucket, and leave no local footprint behind.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::SeedError;
use crate::store::{FileUpload, RemoteStore};

/// All seeded images are uploaded under this content type, matching the
/// bucket's configuration.
const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Downloads a remote image into the cache directory, uploads it to the
/// store's bucket, and returns the store's durable view URL.
///
/// The local copy is a scoped acquisition: it is removed on every exit
/// path, whether the download, the stat, or the upload failed. Cleanup
/// failure is logged as a warning and never masks the primary result.
pub struct ImageMaterializer<'a, S> {
    store: &'a S,
    http: reqwest::Client,
    cache_dir: PathBuf,
}

impl<'a, S: RemoteStore> ImageMaterializer<'a, S> {
    pub fn new(store: &'a S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Re-hosts `source_url` and returns the hosted view URL.
    pub async fn materialize(&self, source_url: &str) -> Result<String, SeedError> {
        let file_name = file_name_for(source_url);
        let local_path = self.cache_dir.join(&file_name);

        let result = self.fetch_and_upload(source_url, &local_path, &file_name).await;

        // Cleanup runs regardless of the outcome above.
        if let Err(e) = tokio::fs::remove_file(&local_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %local_path.display(),
                    "failed to remove cached image: {}",
                    e
                );
            }
        } else {
            tracing::debug!(path = %local_path.display(), "removed cached image");
        }

        result
    }

    async fn fetch_and_upload(
        &self,
        source_url: &str,
        local_path: &Path,
        file_name: &str,
    ) -> Result<String, SeedError> {
        self.download(source_url, local_path).await?;

        // The upload must declare the byte size up front.
        let size = match tokio::fs::metadata(local_path).await {
            Ok(meta) if meta.len() > 0 => meta.len(),
            _ => return Err(SeedError::MissingFile(local_path.to_path_buf())),
        };

        let upload = FileUpload {
            path: local_path.to_path_buf(),
            name: file_name.to_string(),
            content_type: IMAGE_CONTENT_TYPE.to_string(),
            size,
        };
        let file = self
            .store
            .create_file(&Uuid::new_v4().to_string(), &upload)
            .await?;

        tracing::info!(name = file_name, id = %file.id, size, "uploaded image");
        Ok(self.store.file_view_url(&file.id))
    }

    async fn download(&self, url: &str, local_path: &Path) -> Result<(), SeedError> {
        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SeedError::Download {
                    url: url.to_string(),
                    reason: format!("cannot create cache dir: {}", e),
                })?;
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SeedError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SeedError::Download {
                url: url.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| SeedError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tokio::fs::write(local_path, &bytes)
            .await
            .map_err(|e| SeedError::Download {
                url: url.to_string(),
                reason: format!("cannot write local copy: {}", e),
            })?;

        tracing::debug!(url, bytes = bytes.len(), "downloaded image");
        Ok(())
    }
}

/// Local file name for a source URL: its final path segment, or a
/// timestamp-derived name when the URL ends in a slash.
fn file_name_for(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("img-{}.png", chrono::Utc::now().timestamp_millis()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::testutil::{spawn_image_server, MockStore};
    use tempfile::tempdir;

    #[test]
    fn test_file_name_from_last_segment() {
        assert_eq!(
            file_name_for("https://images.example.com/menu/pizza.png"),
            "pizza.png"
        );
    }

    #[test]
    fn test_file_name_synthesized_for_trailing_slash() {
        let name = file_name_for("https://images.example.com/menu/");
        assert!(name.starts_with("img-"));
        assert!(name.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_materialize_uploads_and_removes_local_copy() {
        let base = spawn_image_server().await;
        let cache = tempdir().unwrap();
        let store = MockStore::default();
        let materializer = ImageMaterializer::new(&store, cache.path());

        let url = format!("{}/images/pizza.png", base);
        let hosted = materializer.materialize(&url).await.unwrap();

        assert!(hosted.starts_with("mock://files/"));
        assert!(hosted.ends_with("/view"));
        assert_eq!(store.file_count(), 1);
        assert!(!cache.path().join("pizza.png").exists());
    }

    #[tokio::test]
    async fn test_failed_download_removes_local_copy() {
        let base = spawn_image_server().await;
        let cache = tempdir().unwrap();
        let store = MockStore::default();
        let materializer = ImageMaterializer::new(&store, cache.path());

        let url = format!("{}/broken/pizza.png", base);
        let err = materializer.materialize(&url).await.unwrap_err();

        assert!(matches!(err, SeedError::Download { .. }));
        assert_eq!(store.file_count(), 0);
        assert!(!cache.path().join("pizza.png").exists());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_error() {
        let cache = tempdir().unwrap();
        let store = MockStore::default();
        let materializer = ImageMaterializer::new(&store, cache.path());

        // Nothing listens on the discard port.
        let err = materializer
            .materialize("http://127.0.0.1:9/images/pizza.png")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Download { .. }));
    }
}
