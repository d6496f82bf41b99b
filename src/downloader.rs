use crate::config::Config;
use crate::error::{GalLoaderError, Result};
use crate::fetcher::ImageFetcher;
use crate::guesser::FilenameGuesser;
use crate::models::{Album, AlbumReport};
use crate::resolver::AlbumResolver;
use crate::storage::StorageManager;
use tracing::{error, info};

/// Ties the pieces together for one album: resolve metadata and the first
/// image, then hand the seed filename to the guessing loop.
pub struct AlbumDownloader {
    resolver: AlbumResolver,
    fetcher: ImageFetcher,
    storage: StorageManager,
    stall_budget: u32,
}

impl AlbumDownloader {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: AlbumResolver::new(config.site.clone()),
            fetcher: ImageFetcher::new(),
            storage: StorageManager::new(&config.storage),
            stall_budget: config.guesser.stall_budget,
        }
    }

    pub async fn process_album(&self, album_url: &str) -> Result<AlbumReport> {
        let album = match self.resolver.fetch_album_info(album_url).await {
            Ok(album) => album,
            Err(e) => {
                error!("[DOWNLOADER] Failed to fetch album info: {}", e);
                Album::empty(album_url)
            }
        };

        info!(
            "[DOWNLOADER] Starting the download of images for album: {}",
            album.name
        );
        let album_dir = self.storage.album_dir(&album.name).await?;

        let first_image_url = self
            .resolver
            .resolve_first_image_url(album_url)
            .await
            .ok_or_else(|| GalLoaderError::scraping("failed to find the first image URL"))?;

        let (base_url, filename) = first_image_url
            .rsplit_once('/')
            .ok_or_else(|| GalLoaderError::scraping("first image URL has no path component"))?;
        let seed_core = filename
            .rsplit_once('.')
            .map(|(stem, _ext)| stem)
            .unwrap_or(filename);

        let guesser = FilenameGuesser::new(base_url, album_dir, &self.fetcher);
        let downloaded = guesser
            .run(seed_core, album.total_images, self.stall_budget)
            .await;

        info!(
            "[DOWNLOADER] Downloaded {}/{} images successfully",
            downloaded, album.total_images
        );

        Ok(AlbumReport { album, downloaded })
    }
}
