//! In-memory item store for tests

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::items::dtos::{ClaimItemDto, NewFoundItem, NewLostItem};
use crate::features::items::models::{CollectedItem, FoundItem, LostItem};
use crate::features::items::repository::ItemRepository;

#[derive(Default)]
struct Collections {
    found: Vec<FoundItem>,
    lost: Vec<LostItem>,
    collected: Vec<CollectedItem>,
}

#[derive(Default)]
pub struct InMemoryItemRepository {
    collections: Mutex<Collections>,
}

impl InMemoryItemRepository {
    pub fn collected(&self) -> Vec<CollectedItem> {
        self.collections.lock().unwrap().collected.clone()
    }

    pub fn found(&self) -> Vec<FoundItem> {
        self.collections.lock().unwrap().found.clone()
    }

    pub fn lost(&self) -> Vec<LostItem> {
        self.collections.lock().unwrap().lost.clone()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert_found(&self, item: NewFoundItem) -> Result<FoundItem> {
        let stored = FoundItem {
            id: Uuid::now_v7(),
            description: item.description,
            date: item.date,
            category: item.category,
            subcategory: item.subcategory,
            item_name: item.item_name,
            place: item.place,
            owner_name: item.owner_name,
            details: item.details,
            is_identifiable: item.is_identifiable,
            item_image: item.item_image,
            created_at: Utc::now(),
        };
        self.collections.lock().unwrap().found.push(stored.clone());
        Ok(stored)
    }

    async fn insert_lost(&self, item: NewLostItem) -> Result<LostItem> {
        let stored = LostItem {
            id: Uuid::now_v7(),
            description: item.description,
            date: item.date,
            phone: item.phone,
            name: item.name,
            sap_id: item.sap_id,
            category: item.category,
            subcategory: item.subcategory,
            item_name: item.item_name,
            item_image: item.item_image,
            place: item.place,
            created_at: Utc::now(),
        };
        self.collections.lock().unwrap().lost.push(stored.clone());
        Ok(stored)
    }

    async fn list_found(&self) -> Result<Vec<FoundItem>> {
        Ok(self.found())
    }

    async fn list_lost(&self) -> Result<Vec<LostItem>> {
        Ok(self.lost())
    }

    async fn claim_found(&self, id: Uuid, claim: ClaimItemDto) -> Result<Option<CollectedItem>> {
        let mut collections = self.collections.lock().unwrap();
        let Some(index) = collections.found.iter().position(|item| item.id == id) else {
            return Ok(None);
        };

        let found = collections.found.remove(index);
        let collected = CollectedItem::from_claim(found, claim, Utc::now());
        collections.collected.push(collected.clone());
        Ok(Some(collected))
    }
}
