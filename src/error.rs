use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalLoaderError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Scraping error: {0}")]
    Scraping(String),
}

impl GalLoaderError {
    pub fn scraping(msg: impl Into<String>) -> Self {
        Self::Scraping(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GalLoaderError>;
