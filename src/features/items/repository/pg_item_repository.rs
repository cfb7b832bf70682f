use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{ClaimItemDto, NewFoundItem, NewLostItem};
use crate::features::items::models::{CollectedItem, FoundItem, LostItem};
use crate::features::items::repository::ItemRepository;

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert_found(&self, item: NewFoundItem) -> Result<FoundItem> {
        sqlx::query_as::<_, FoundItem>(
            r#"
            INSERT INTO found_items (id, description, date, category, subcategory, item_name, place, owner_name, details, is_identifiable, item_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, description, date, category, subcategory, item_name, place, owner_name, details, is_identifiable, item_image, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(item.description)
        .bind(item.date)
        .bind(item.category)
        .bind(item.subcategory)
        .bind(item.item_name)
        .bind(item.place)
        .bind(item.owner_name)
        .bind(item.details)
        .bind(item.is_identifiable)
        .bind(item.item_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert found item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert_lost(&self, item: NewLostItem) -> Result<LostItem> {
        sqlx::query_as::<_, LostItem>(
            r#"
            INSERT INTO lost_items (id, description, date, phone, name, sap_id, category, subcategory, item_name, item_image, place)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, description, date, phone, name, sap_id, category, subcategory, item_name, item_image, place, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(item.description)
        .bind(item.date)
        .bind(item.phone)
        .bind(item.name)
        .bind(item.sap_id)
        .bind(item.category)
        .bind(item.subcategory)
        .bind(item.item_name)
        .bind(item.item_image)
        .bind(item.place)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert lost item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_found(&self) -> Result<Vec<FoundItem>> {
        sqlx::query_as::<_, FoundItem>(
            r#"
            SELECT id, description, date, category, subcategory, item_name, place, owner_name, details, is_identifiable, item_image, created_at
            FROM found_items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list found items: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_lost(&self) -> Result<Vec<LostItem>> {
        sqlx::query_as::<_, LostItem>(
            r#"
            SELECT id, description, date, phone, name, sap_id, category, subcategory, item_name, item_image, place, created_at
            FROM lost_items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list lost items: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn claim_found(&self, id: Uuid, claim: ClaimItemDto) -> Result<Option<CollectedItem>> {
        let mut tx = self.pool.begin().await?;

        // Row lock: a concurrent claim of the same item waits here and then
        // finds nothing
        let found = sqlx::query_as::<_, FoundItem>(
            r#"
            SELECT id, description, date, category, subcategory, item_name, place, owner_name, details, is_identifiable, item_image, created_at
            FROM found_items
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(found) = found else {
            tx.rollback().await?;
            return Ok(None);
        };

        let draft = CollectedItem::from_claim(found, claim, Utc::now());

        let collected = sqlx::query_as::<_, CollectedItem>(
            r#"
            INSERT INTO collected_items (
                id, found_item_id, description, date, category, subcategory, item_name, place,
                owner_name, details, is_identifiable, item_image,
                claimant_name, claimant_phone, claimant_sap_id, claimant_email, claim_details,
                found_at, claimed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(draft.id)
        .bind(draft.found_item_id)
        .bind(draft.description)
        .bind(draft.date)
        .bind(draft.category)
        .bind(draft.subcategory)
        .bind(draft.item_name)
        .bind(draft.place)
        .bind(draft.owner_name)
        .bind(draft.details)
        .bind(draft.is_identifiable)
        .bind(draft.item_image)
        .bind(draft.claimant_name)
        .bind(draft.claimant_phone)
        .bind(draft.claimant_sap_id)
        .bind(draft.claimant_email)
        .bind(draft.claim_details)
        .bind(draft.found_at)
        .bind(draft.claimed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to archive claimed item {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        sqlx::query("DELETE FROM found_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(collected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim(body: serde_json::Value) -> ClaimItemDto {
        serde_json::from_value(body).unwrap()
    }

    async fn seed(repository: &PgItemRepository, item_name: &str) -> FoundItem {
        repository
            .insert_found(NewFoundItem {
                item_name: Some(item_name.to_string()),
                place: Some("library".to_string()),
                details: Some("scratched".to_string()),
                is_identifiable: Some(true),
                item_image: Some("itemImage-1-1.png".to_string()),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_claim_moves_row_in_one_transaction(pool: PgPool) {
        let repository = PgItemRepository::new(pool.clone());
        let found = seed(&repository, "umbrella").await;

        let collected = repository
            .claim_found(
                found.id,
                claim(json!({
                    "name": "Rosa",
                    "phone": 5551234,
                    "details": null,
                    "pickupNote": { "desk": 2 }
                })),
            )
            .await
            .unwrap()
            .expect("claim should find the item");

        assert_eq!(collected.found_item_id, found.id);
        assert_eq!(collected.item_name.as_deref(), Some("umbrella"));
        assert_eq!(collected.place.as_deref(), Some("library"));
        assert_eq!(collected.details, None);
        assert_eq!(collected.is_identifiable, Some(true));
        assert_eq!(collected.claimant_name.as_deref(), Some("Rosa"));
        assert_eq!(collected.claimant_phone.as_deref(), Some("5551234"));
        assert_eq!(collected.claim_details.0.get("pickupNote"), Some(&json!({ "desk": 2 })));
        assert_eq!(collected.found_at, found.created_at);

        assert!(repository.list_found().await.unwrap().is_empty());
        assert_eq!(count(&pool, "collected_items").await, 1);

        let stored =
            sqlx::query_as::<_, CollectedItem>("SELECT * FROM collected_items WHERE id = $1")
                .bind(collected.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(stored, collected);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_claim_of_missing_item_changes_nothing(pool: PgPool) {
        let repository = PgItemRepository::new(pool.clone());
        let kept = seed(&repository, "keys").await;

        let outcome = repository
            .claim_found(Uuid::now_v7(), ClaimItemDto::default())
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(repository.list_found().await.unwrap(), vec![kept]);
        assert_eq!(count(&pool, "collected_items").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_concurrent_claims_archive_once(pool: PgPool) {
        let repository = PgItemRepository::new(pool.clone());
        let found = seed(&repository, "laptop").await;

        let (first, second) = tokio::join!(
            repository.claim_found(found.id, claim(json!({ "name": "First" }))),
            repository.claim_found(found.id, claim(json!({ "name": "Second" }))),
        );

        let claimed = [first.unwrap(), second.unwrap()]
            .into_iter()
            .flatten()
            .count();
        assert_eq!(claimed, 1);
        assert_eq!(count(&pool, "found_items").await, 0);
        assert_eq!(count(&pool, "collected_items").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a Postgres server"]
    async fn test_lists_follow_insertion_order(pool: PgPool) {
        let repository = PgItemRepository::new(pool);

        let first = seed(&repository, "first").await;
        let second = seed(&repository, "second").await;
        let lost = repository
            .insert_lost(NewLostItem {
                phone: Some("555-0101".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let found: Vec<Uuid> = repository
            .list_found()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(found, vec![first.id, second.id]);
        assert_eq!(repository.list_lost().await.unwrap(), vec![lost]);
    }
}
