//! Item store
//!
//! `ItemRepository` is the seam between the item service and persistence.
//! `PgItemRepository` is the Postgres implementation used by the server.

mod pg_item_repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::items::dtos::{ClaimItemDto, NewFoundItem, NewLostItem};
use crate::features::items::models::{CollectedItem, FoundItem, LostItem};

pub use pg_item_repository::PgItemRepository;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn insert_found(&self, item: NewFoundItem) -> Result<FoundItem>;

    async fn insert_lost(&self, item: NewLostItem) -> Result<LostItem>;

    /// Every found item, oldest first
    async fn list_found(&self) -> Result<Vec<FoundItem>>;

    /// Every lost item, oldest first
    async fn list_lost(&self) -> Result<Vec<LostItem>>;

    /// Move a found item into the collected archive.
    ///
    /// Copy and delete happen atomically. Returns `None` when no found item
    /// has this id, in which case nothing changes.
    async fn claim_found(&self, id: Uuid, claim: ClaimItemDto) -> Result<Option<CollectedItem>>;
}
