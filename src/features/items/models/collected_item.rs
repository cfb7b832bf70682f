use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::items::dtos::ClaimItemDto;
use crate::features::items::models::FoundItem;

/// Archive record of a claimed found item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CollectedItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub found_item_id: Uuid,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    pub place: Option<String>,
    pub owner_name: Option<String>,
    pub details: Option<String>,
    pub is_identifiable: Option<bool>,
    pub item_image: Option<String>,
    pub claimant_name: Option<String>,
    pub claimant_phone: Option<String>,
    pub claimant_sap_id: Option<String>,
    pub claimant_email: Option<String>,
    /// Claim body keys with no dedicated column
    pub claim_details: Json<serde_json::Map<String, serde_json::Value>>,
    /// When the source found item was reported
    pub found_at: DateTime<Utc>,
    pub claimed_at: DateTime<Utc>,
}

impl CollectedItem {
    /// Merge a found item with the claim body.
    ///
    /// Claim fields that name a found-item field replace the copied value,
    /// an explicit null included.
    pub fn from_claim(found: FoundItem, claim: ClaimItemDto, claimed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            found_item_id: found.id,
            description: claim.description.unwrap_or(found.description),
            date: claim.date.unwrap_or(found.date),
            category: claim.category.unwrap_or(found.category),
            subcategory: claim.subcategory.unwrap_or(found.subcategory),
            item_name: claim.item_name.unwrap_or(found.item_name),
            place: claim.place.unwrap_or(found.place),
            owner_name: claim.owner_name.unwrap_or(found.owner_name),
            details: claim.details.unwrap_or(found.details),
            is_identifiable: claim.is_identifiable.unwrap_or(found.is_identifiable),
            item_image: claim.item_image.unwrap_or(found.item_image),
            claimant_name: claim.name,
            claimant_phone: claim.phone,
            claimant_sap_id: claim.sap_id,
            claimant_email: claim.email,
            claim_details: Json(claim.extra),
            found_at: found.created_at,
            claimed_at,
        }
    }
}
