use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub url: String,
    pub name: String,
    pub total_images: usize,
}

impl Album {
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: String::new(),
            total_images: 0,
        }
    }
}

/// Outcome of processing one album.
#[derive(Debug, Clone)]
pub struct AlbumReport {
    pub album: Album,
    pub downloaded: usize,
}

impl AlbumReport {
    pub fn complete(&self) -> bool {
        self.downloaded >= self.album.total_images
    }
}
