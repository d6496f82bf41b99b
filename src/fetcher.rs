use crate::error::Result;
use crate::traits::ImageSink;
use crate::utils::HttpClient;
use image::ImageFormat;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Every saved file gets this extension, whatever the server sent. WebP
/// responses are actually converted; other formats are written verbatim
/// under the jpg name (matching the site's mixed hosting).
pub const TARGET_EXTENSION: &str = "jpg";

#[derive(Clone, Default)]
pub struct ImageFetcher {
    http_client: HttpClient,
}

impl ImageFetcher {
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
        }
    }

    async fn try_fetch(&self, url: &str, save_path: &Path) -> Result<()> {
        let mut response = self.http_client.get_raw(url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        debug!("[FETCHER] Content-Type for {}: {}", url, content_type);

        let target = save_path.with_extension(TARGET_EXTENSION);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if content_type.contains("image/webp") {
            // Re-encode as JPEG; webp viewers are not a given for the
            // people this tool downloads for.
            let bytes = response.bytes().await?;
            let decoded = image::load_from_memory(&bytes)?;
            decoded.to_rgb8().save_with_format(&target, ImageFormat::Jpeg)?;
            info!("[FETCHER] Converted and saved WebP image as JPEG to {:?}", target);
        } else {
            let mut file = tokio::fs::File::create(&target).await?;
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            info!("[FETCHER] Image saved to {:?}", target);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ImageSink for ImageFetcher {
    async fn fetch_and_save(&self, url: &str, save_path: &Path) -> bool {
        match self.try_fetch(url, save_path).await {
            Ok(()) => true,
            Err(e) => {
                warn!("[FETCHER] Failed to download image from {}: {}", url, e);
                false
            }
        }
    }
}
