use crate::config::StorageConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    config: StorageConfig,
}

impl StorageManager {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// `{base_path}/{sanitized album name}`, created if missing.
    pub async fn album_dir(&self, album_name: &str) -> Result<PathBuf> {
        let sanitized = sanitize_filename(album_name);
        let path = Path::new(&self.config.base_path).join(sanitized);

        tokio::fs::create_dir_all(&path).await?;

        Ok(path)
    }
}

pub fn sanitize_filename(filename: &str) -> String {
    let sanitized = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches(|c: char| c == '.' || c == ' ')
        .to_string();

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_filename("what?"), "what_");
    }

    #[test]
    fn sanitize_trims_dots_and_spaces() {
        assert_eq!(sanitize_filename(" name. "), "name");
    }

    #[test]
    fn empty_name_falls_back_to_untitled() {
        assert_eq!(sanitize_filename(""), "untitled");
        assert_eq!(sanitize_filename(" . "), "untitled");
    }
}
