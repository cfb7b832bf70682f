use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A report that someone located an unclaimed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    pub place: Option<String>,
    /// Name of the person who found the item
    pub owner_name: Option<String>,
    pub details: Option<String>,
    pub is_identifiable: Option<bool>,
    /// Stored filename under `foundItemImages`
    pub item_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
