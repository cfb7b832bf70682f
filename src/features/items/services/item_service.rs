use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{
    ClaimItemDto, ItemSubmission, NewFoundItem, NewLostItem, UploadedImage,
};
use crate::features::items::models::{CollectedItem, FoundItem, LostItem};
use crate::features::items::repository::ItemRepository;
use crate::modules::storage::{ImageCategory, LocalImageStorage};
use crate::shared::constants::ITEM_IMAGE_FIELD;

/// Item reporting, listing and claiming.
///
/// Shared by the JSON API and the HTML pages.
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    storage: Arc<LocalImageStorage>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository>, storage: Arc<LocalImageStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Store a found-item report. The image is required.
    pub async fn submit_found(&self, submission: ItemSubmission) -> Result<FoundItem> {
        let mut item = NewFoundItem::from_fields(&submission.fields)?;
        let image = submission
            .image
            .ok_or_else(|| AppError::BadRequest("Item image is required".to_string()))?;

        item.item_image = Some(self.store_image(ImageCategory::Found, image).await?);

        let stored = self.repository.insert_found(item).await?;
        info!("Found item stored: id={}", stored.id);
        Ok(stored)
    }

    /// Store a lost-item report. Without an image the filename stays null.
    pub async fn submit_lost(&self, submission: ItemSubmission) -> Result<LostItem> {
        let mut item = NewLostItem::from_fields(&submission.fields);
        if let Some(image) = submission.image {
            item.item_image = Some(self.store_image(ImageCategory::Lost, image).await?);
        }

        let stored = self.repository.insert_lost(item).await?;
        info!("Lost item stored: id={}", stored.id);
        Ok(stored)
    }

    pub async fn list_found(&self) -> Result<Vec<FoundItem>> {
        self.repository.list_found().await
    }

    pub async fn list_lost(&self) -> Result<Vec<LostItem>> {
        self.repository.list_lost().await
    }

    /// Move a found item into the collected archive
    pub async fn claim(&self, id: &str, claim: ClaimItemDto) -> Result<CollectedItem> {
        // An id that cannot name a stored item is treated like a missing one
        let Ok(id) = Uuid::parse_str(id) else {
            debug!("Claim with malformed id: {}", id);
            return Err(AppError::NotFound("Item not found".to_string()));
        };

        let collected = self
            .repository
            .claim_found(id, claim)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        info!(
            "Item claimed: found_id={}, collected_id={}",
            collected.found_item_id, collected.id
        );
        Ok(collected)
    }

    async fn store_image(&self, category: ImageCategory, image: UploadedImage) -> Result<String> {
        self.storage
            .save(category, ITEM_IMAGE_FIELD, &image.filename, &image.data)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::items::repository::memory::InMemoryItemRepository;
    use crate::shared::test_helpers::temp_upload_config;
    use std::collections::HashMap;

    fn service() -> (ItemService, Arc<InMemoryItemRepository>, Arc<LocalImageStorage>) {
        let repository = Arc::new(InMemoryItemRepository::default());
        let storage = Arc::new(LocalImageStorage::new(&temp_upload_config()));
        let service = ItemService::new(repository.clone(), storage.clone());
        (service, repository, storage)
    }

    fn submission(pairs: &[(&str, &str)], image: Option<&str>) -> ItemSubmission {
        ItemSubmission {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            image: image.map(|name| UploadedImage {
                filename: name.to_string(),
                data: b"fake-image".to_vec(),
            }),
        }
    }

    #[tokio::test]
    async fn test_found_item_stores_image_filename() {
        let (service, repository, storage) = service();

        let stored = service
            .submit_found(submission(&[("itemName", "keys")], Some("keys.jpg")))
            .await
            .unwrap();

        let filename = stored.item_image.clone().unwrap();
        assert!(filename.starts_with("itemImage-"));
        assert!(filename.ends_with(".jpg"));
        assert!(storage
            .folder_path(ImageCategory::Found)
            .join(&filename)
            .exists());
        assert_eq!(repository.found(), vec![stored]);
    }

    #[tokio::test]
    async fn test_found_item_without_image_is_rejected() {
        let (service, repository, _) = service();

        let result = service
            .submit_found(submission(&[("itemName", "keys")], None))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(repository.found().is_empty());
    }

    #[tokio::test]
    async fn test_lost_item_without_image_stores_null() {
        let (service, repository, _) = service();

        let stored = service
            .submit_lost(submission(&[("name", "Alice")], None))
            .await
            .unwrap();

        assert_eq!(stored.item_image, None);
        assert_eq!(repository.lost().len(), 1);
    }

    #[tokio::test]
    async fn test_claim_moves_item() {
        let (service, repository, _) = service();
        let found = service
            .submit_found(submission(&[("place", "gym")], Some("bag.png")))
            .await
            .unwrap();

        let collected = service
            .claim(&found.id.to_string(), ClaimItemDto::default())
            .await
            .unwrap();

        assert_eq!(collected.found_item_id, found.id);
        assert_eq!(collected.place.as_deref(), Some("gym"));
        assert!(repository.found().is_empty());
        assert_eq!(repository.collected().len(), 1);
    }

    #[tokio::test]
    async fn test_claim_with_malformed_id_is_not_found() {
        let (service, _, _) = service();

        let result = service.claim("not-a-uuid", ClaimItemDto::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
