use std::path::Path;

/// Trait for the fetch-and-save side of the guessing loop. The loop only
/// cares whether a candidate URL produced a file on disk; everything about
/// HTTP, content types and image conversion lives behind this seam.
#[async_trait::async_trait]
pub trait ImageSink: Send + Sync {
    /// Download `url` and persist it at `save_path` (the implementation may
    /// adjust the extension). Returns true only on a completed write.
    async fn fetch_and_save(&self, url: &str, save_path: &Path) -> bool;
}
