use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub site: SiteConfig,
    pub guesser: GuesserConfig,
    #[serde(default)]
    pub albums: Vec<AlbumConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub base_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub user_agent: Option<String>,
    pub selectors: SelectorsConfig,
    pub markers: MarkersConfig,
}

/// CSS selectors for the site's page structure. These are configuration
/// rather than constants so a layout change doesn't require a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorsConfig {
    pub breadcrumb: String,
    pub album_info: String,
    pub page_count_label: String,
    pub gallery_item_link: String,
    pub photo_container: String,
    pub photo_image: String,
}

/// Text markers used when parsing labeled fields out of element text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub breadcrumb_separator: String,
    pub page_count_marker: String,
    pub page_count_separator: String,
    pub page_count_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuesserConfig {
    /// Consecutive fully-failed guessing rounds tolerated before the album
    /// is abandoned.
    pub stall_budget: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumConfig {
    pub url: String,
    pub active: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                base_path: "./downloaded".to_string(),
            },
            site: SiteConfig {
                base_url: "https://example.com".to_string(),
                user_agent: Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()),
                selectors: SelectorsConfig {
                    breadcrumb: "div.bread".to_string(),
                    album_info: "div.asTBcell.uwconn".to_string(),
                    page_count_label: "label".to_string(),
                    gallery_item_link: "li.gallary_item a".to_string(),
                    photo_container: "div#photo_body".to_string(),
                    photo_image: "img#picarea".to_string(),
                },
                markers: MarkersConfig {
                    breadcrumb_separator: ">".to_string(),
                    page_count_marker: "頁數".to_string(),
                    page_count_separator: "：".to_string(),
                    page_count_unit: "P".to_string(),
                },
            },
            guesser: GuesserConfig { stall_budget: 25 },
            albums: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.site.base_url, config.site.base_url);
        assert_eq!(parsed.guesser.stall_budget, 25);
        assert!(parsed.albums.is_empty());
    }

    #[test]
    fn album_list_parses_from_toml() {
        let text = r#"
            [storage]
            base_path = "./downloaded"

            [site]
            base_url = "https://example.com"

            [site.selectors]
            breadcrumb = "div.bread"
            album_info = "div.info"
            page_count_label = "label"
            gallery_item_link = "li.item a"
            photo_container = "div#photo_body"
            photo_image = "img#picarea"

            [site.markers]
            breadcrumb_separator = ">"
            page_count_marker = "Pages"
            page_count_separator = ":"
            page_count_unit = "P"

            [guesser]
            stall_budget = 10

            [[albums]]
            url = "https://example.com/album-1"
            active = true

            [[albums]]
            url = "https://example.com/album-2"
            active = false
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.albums.len(), 2);
        assert!(config.albums[0].active);
        assert_eq!(config.guesser.stall_budget, 10);
        assert!(config.site.user_agent.is_none());
    }
}
