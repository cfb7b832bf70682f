//! Local disk storage for item images
//!
//! Filenames are `<field>-<unix millis>-<random>` plus the original
//! extension, so concurrent uploads of the same file never collide.

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::Result;
use crate::shared::constants::{FOUND_ITEM_IMAGES_DIR, LOST_ITEM_IMAGES_DIR};

lazy_static! {
    /// Extensions kept from the uploaded filename (without the dot)
    static ref EXTENSION_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{1,16}$").unwrap();
}

/// Which folder an image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Lost,
    Found,
}

impl ImageCategory {
    pub fn folder(self) -> &'static str {
        match self {
            ImageCategory::Lost => LOST_ITEM_IMAGES_DIR,
            ImageCategory::Found => FOUND_ITEM_IMAGES_DIR,
        }
    }
}

/// Build a collision-resistant filename for an upload
pub fn generate_filename(field_name: &str, original_filename: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;

    let extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| EXTENSION_REGEX.is_match(ext))
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    format!("{}-{}-{}{}", field_name, millis, suffix, extension)
}

/// Image storage rooted at a local directory
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.root.clone(),
        }
    }

    pub fn folder_path(&self, category: ImageCategory) -> PathBuf {
        self.root.join(category.folder())
    }

    /// Create both image folders if missing
    pub async fn ensure_folders(&self) -> Result<()> {
        for category in [ImageCategory::Found, ImageCategory::Lost] {
            let path = self.folder_path(category);
            tokio::fs::create_dir_all(&path).await?;
            info!("Image folder ready: {}", path.display());
        }
        Ok(())
    }

    /// Write an uploaded image and return the stored filename
    pub async fn save(
        &self,
        category: ImageCategory,
        field_name: &str,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String> {
        let folder = self.folder_path(category);
        tokio::fs::create_dir_all(&folder).await?;

        let filename = generate_filename(field_name, original_filename);
        tokio::fs::write(folder.join(&filename), data).await?;

        debug!(
            "Image stored: folder={}, filename={}, size={}",
            category.folder(),
            filename,
            data.len()
        );

        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::temp_upload_config;

    #[test]
    fn test_filename_keeps_field_and_extension() {
        let name = generate_filename("itemImage", "wallet photo.JPG");
        assert!(name.starts_with("itemImage-"));
        assert!(name.ends_with(".JPG"));

        let parts: Vec<&str> = name.trim_end_matches(".JPG").split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].parse::<u64>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_filename_without_extension() {
        let name = generate_filename("itemImage", "README");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_suspicious_extension_dropped() {
        let name = generate_filename("itemImage", "x.ph p");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_filenames_do_not_collide() {
        let a = generate_filename("itemImage", "a.png");
        let b = generate_filename("itemImage", "a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_category_folders() {
        assert_eq!(ImageCategory::Found.folder(), "foundItemImages");
        assert_eq!(ImageCategory::Lost.folder(), "lostItemImages");
    }

    #[tokio::test]
    async fn test_save_writes_bytes_under_category_folder() {
        let config = temp_upload_config();
        let storage = LocalImageStorage::new(&config);

        let filename = storage
            .save(ImageCategory::Found, "itemImage", "keys.png", b"png-bytes")
            .await
            .unwrap();

        let written = tokio::fs::read(config.root.join("foundItemImages").join(&filename))
            .await
            .unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_ensure_folders_creates_both() {
        let config = temp_upload_config();
        let storage = LocalImageStorage::new(&config);
        storage.ensure_folders().await.unwrap();

        assert!(config.root.join("foundItemImages").is_dir());
        assert!(config.root.join("lostItemImages").is_dir());
    }
}
