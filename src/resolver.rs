use crate::config::SiteConfig;
use crate::error::{GalLoaderError, Result};
use crate::models::Album;
use crate::utils::HttpClient;
use scraper::{Html, Selector};
use tracing::{error, info, warn};
use url::Url;

/// Resolves album metadata and the first image URL from the site's HTML.
/// All selectors and text markers come from [`SiteConfig`], so the parsing
/// logic is testable against fixtures and survives site layout tweaks.
pub struct AlbumResolver {
    http_client: HttpClient,
    site: SiteConfig,
}

fn selector(source: &str) -> Result<Selector> {
    Selector::parse(source)
        .map_err(|e| GalLoaderError::scraping(format!("invalid selector '{}': {}", source, e)))
}

impl AlbumResolver {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            site,
        }
    }

    /// Fetch the album listing page and extract its display name and
    /// expected image count. Missing elements leave the defaults in place;
    /// a network failure is reported to the caller.
    pub async fn fetch_album_info(&self, album_url: &str) -> Result<Album> {
        info!("[RESOLVER] Fetching album information from: {}", album_url);

        let html = self.http_client.get(album_url, &self.site).await?;
        let document = Html::parse_document(&html);

        let mut album = Album::empty(album_url);
        if let Some(name) = self.parse_album_name(&document)? {
            info!("[RESOLVER] Album name extracted: {}", name);
            album.name = name;
        }
        if let Some(total) = self.parse_total_images(&document)? {
            info!("[RESOLVER] Total number of images: {}", total);
            album.total_images = total;
        }

        Ok(album)
    }

    /// Last breadcrumb segment after the configured separator.
    fn parse_album_name(&self, document: &Html) -> Result<Option<String>> {
        let breadcrumb = selector(&self.site.selectors.breadcrumb)?;
        let name = document.select(&breadcrumb).next().and_then(|el| {
            let text = el.text().collect::<String>();
            text.split(self.site.markers.breadcrumb_separator.as_str())
                .last()
                .map(|segment| segment.trim().to_string())
                .filter(|segment| !segment.is_empty())
        });
        Ok(name)
    }

    /// The labeled page-count field, e.g. a label reading `頁數：24P`.
    fn parse_total_images(&self, document: &Html) -> Result<Option<usize>> {
        let info_block = selector(&self.site.selectors.album_info)?;
        let label_sel = selector(&self.site.selectors.page_count_label)?;
        let markers = &self.site.markers;

        let Some(block) = document.select(&info_block).next() else {
            return Ok(None);
        };

        for label in block.select(&label_sel) {
            let text = label.text().collect::<String>();
            if !text.contains(markers.page_count_marker.as_str()) {
                continue;
            }
            let Some(value) = text.split(markers.page_count_separator.as_str()).nth(1) else {
                continue;
            };
            let value = value
                .trim()
                .trim_end_matches(markers.page_count_unit.as_str())
                .trim();
            match value.parse::<usize>() {
                Ok(total) => return Ok(Some(total)),
                Err(e) => warn!("[RESOLVER] Unparseable page count '{}': {}", value, e),
            }
        }

        Ok(None)
    }

    /// Locate the first gallery item on the listing page, follow its link
    /// and pull the displayed image's source. Any missing element or fetch
    /// failure is logged and yields `None`.
    pub async fn resolve_first_image_url(&self, album_url: &str) -> Option<String> {
        match self.try_resolve_first_image_url(album_url).await {
            Ok(Some(url)) => {
                info!("[RESOLVER] First image source found: {}", url);
                Some(url)
            }
            Ok(None) => {
                error!("[RESOLVER] Failed to locate the first image URL in the album page");
                None
            }
            Err(e) => {
                error!("[RESOLVER] Error while resolving the first image URL: {}", e);
                None
            }
        }
    }

    async fn try_resolve_first_image_url(&self, album_url: &str) -> Result<Option<String>> {
        let html = self.http_client.get(album_url, &self.site).await?;

        // Scoped so the parsed document is gone before the next fetch.
        let first_page_url = {
            let document = Html::parse_document(&html);
            let link = selector(&self.site.selectors.gallery_item_link)?;
            let Some(href) = document
                .select(&link)
                .next()
                .and_then(|el| el.value().attr("href"))
            else {
                return Ok(None);
            };
            Url::parse(&self.site.base_url)?.join(href)?.to_string()
        };

        let image_html = self.http_client.get(&first_page_url, &self.site).await?;
        let document = Html::parse_document(&image_html);
        let container = selector(&self.site.selectors.photo_container)?;
        let image = selector(&self.site.selectors.photo_image)?;

        let src = document
            .select(&container)
            .next()
            .and_then(|body| body.select(&image).next())
            .and_then(|img| img.value().attr("src"));

        Ok(src.map(|s| self.absolutize(s)))
    }

    /// Normalize protocol-relative and root-relative sources against the
    /// site's base origin.
    fn absolutize(&self, src: &str) -> String {
        if let Some(rest) = src.strip_prefix("//") {
            format!("https://{}", rest)
        } else if src.starts_with('/') {
            format!("{}{}", self.site.base_url.trim_end_matches('/'), src)
        } else {
            src.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const LISTING: &str = r#"
        <html><body>
            <div class="png bread">Home &gt; Comics &gt; Sample Album</div>
            <div class="asTBcell uwconn">
                <label>分類：comics</label>
                <label>頁數：24P</label>
            </div>
            <ul>
                <li class="li tb gallary_item"><a href="/photos-view-1.html"><img src="/t/1.jpg"></a></li>
            </ul>
        </body></html>
    "#;

    fn resolver() -> AlbumResolver {
        AlbumResolver::new(Config::default().site)
    }

    #[test]
    fn album_name_is_last_breadcrumb_segment() {
        let document = Html::parse_document(LISTING);
        let name = resolver().parse_album_name(&document).unwrap();
        assert_eq!(name.as_deref(), Some("Sample Album"));
    }

    #[test]
    fn total_images_parsed_from_labeled_field() {
        let document = Html::parse_document(LISTING);
        let total = resolver().parse_total_images(&document).unwrap();
        assert_eq!(total, Some(24));
    }

    #[test]
    fn missing_elements_leave_defaults() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let resolver = resolver();
        assert_eq!(resolver.parse_album_name(&document).unwrap(), None);
        assert_eq!(resolver.parse_total_images(&document).unwrap(), None);
    }

    #[test]
    fn garbled_page_count_is_skipped() {
        let html = r#"<div class="asTBcell uwconn"><label>頁數：manyP</label></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(resolver().parse_total_images(&document).unwrap(), None);
    }

    #[test]
    fn absolutize_handles_relative_forms() {
        let resolver = resolver();
        assert_eq!(
            resolver.absolutize("//cdn.example.com/a/01.jpg"),
            "https://cdn.example.com/a/01.jpg"
        );
        assert_eq!(
            resolver.absolutize("/a/01.jpg"),
            "https://example.com/a/01.jpg"
        );
        assert_eq!(
            resolver.absolutize("https://cdn.example.com/a/01.jpg"),
            "https://cdn.example.com/a/01.jpg"
        );
    }
}
