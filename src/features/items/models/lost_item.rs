use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A report that someone is missing an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: Option<String>,
    pub date: Option<String>,
    /// Reporter's contact phone
    pub phone: Option<String>,
    /// Reporter's name
    pub name: Option<String>,
    /// Reporter's institutional id
    pub sap_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    /// Stored filename under `lostItemImages`, null when no image was sent
    pub item_image: Option<String>,
    pub place: Option<String>,
    pub created_at: DateTime<Utc>,
}
