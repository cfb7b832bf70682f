use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};

/// Submitted found-item fields, as read from the multipart form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoundItem {
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
}

/// Submitted lost-item fields, as read from the multipart form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLostItem {
    pub description: Option<String>,
    pub date: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub sap_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    pub item_image: Option<String>,
    pub place: Option<String>,
}

impl NewFoundItem {
    /// Pick the known found-item fields out of the submitted form.
    /// Unknown fields are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        let text = |key: &str| fields.get(key).cloned();

        Ok(Self {
            description: text("description"),
            date: text("date"),
            category: text("category"),
            subcategory: text("subcategory"),
            item_name: text("itemName"),
            place: text("place"),
            owner_name: text("ownerName"),
            details: text("details"),
            is_identifiable: parse_flag("isIdentifiable", fields.get("isIdentifiable"))?,
            item_image: None,
        })
    }
}

impl NewLostItem {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).cloned();

        Self {
            description: text("description"),
            date: text("date"),
            phone: text("phone"),
            name: text("name"),
            sap_id: text("sapId"),
            category: text("category"),
            subcategory: text("subcategory"),
            item_name: text("itemName"),
            item_image: None,
            place: text("place"),
        }
    }
}

/// Parse a boolean form field. Empty means unset.
fn parse_flag(name: &str, value: Option<&String>) -> Result<Option<bool>> {
    let Some(value) = value.map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    flag_from_str(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Field '{}' must be a boolean, got '{}'",
            name, value
        ))
    })
    .map(Some)
}

fn flag_from_str(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Claim request body.
///
/// `name`, `phone`, `sapId` and `email` describe the claimant. Fields named
/// like a found-item field replace the copied value: `None` keeps it and
/// `Some(None)` (an explicit `null`) clears it. Any other key is kept in
/// `claimDetails`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimItemDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub sap_id: Option<String>,
    pub email: Option<String>,

    pub description: Option<Option<String>>,
    pub date: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub subcategory: Option<Option<String>>,
    pub item_name: Option<Option<String>>,
    pub place: Option<Option<String>>,
    pub owner_name: Option<Option<String>>,
    pub details: Option<Option<String>>,
    pub is_identifiable: Option<Option<bool>>,
    pub item_image: Option<Option<String>>,

    pub extra: Map<String, Value>,
}

impl ClaimItemDto {
    /// Split a JSON object into claimant fields, overrides and extras.
    ///
    /// Text fields take any scalar. `isIdentifiable` takes a boolean, `0`/`1`
    /// or the spellings accepted by the submission forms. A value that does
    /// not fit its field stays in `extra` under its own key.
    pub fn from_body(body: Map<String, Value>) -> Self {
        let mut claim = Self::default();

        for (key, raw) in body {
            let rest = match key.as_str() {
                "name" => claimant(&mut claim.name, raw),
                "phone" => claimant(&mut claim.phone, raw),
                "sapId" => claimant(&mut claim.sap_id, raw),
                "email" => claimant(&mut claim.email, raw),
                "description" => replace(&mut claim.description, nullable_text(&raw), raw),
                "date" => replace(&mut claim.date, nullable_text(&raw), raw),
                "category" => replace(&mut claim.category, nullable_text(&raw), raw),
                "subcategory" => replace(&mut claim.subcategory, nullable_text(&raw), raw),
                "itemName" => replace(&mut claim.item_name, nullable_text(&raw), raw),
                "place" => replace(&mut claim.place, nullable_text(&raw), raw),
                "ownerName" => replace(&mut claim.owner_name, nullable_text(&raw), raw),
                "details" => replace(&mut claim.details, nullable_text(&raw), raw),
                "itemImage" => replace(&mut claim.item_image, nullable_text(&raw), raw),
                "isIdentifiable" => {
                    replace(&mut claim.is_identifiable, nullable_flag(&raw), raw)
                }
                _ => Some(raw),
            };

            if let Some(raw) = rest {
                claim.extra.insert(key, raw);
            }
        }

        claim
    }
}

impl<'de> Deserialize<'de> for ClaimItemDto {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_body)
    }
}

/// `Some(None)` for null, `Some(Some(_))` for a scalar, `None` otherwise.
fn nullable_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn nullable_flag(value: &Value) -> Option<Option<bool>> {
    match value {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(Some(true)),
            Some(0) => Some(Some(false)),
            _ => None,
        },
        Value::String(s) if s.trim().is_empty() => Some(None),
        Value::String(s) => flag_from_str(s).map(Some),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Claimant fields have no found-item value to clear, so null leaves them unset.
fn claimant(slot: &mut Option<String>, raw: Value) -> Option<Value> {
    match nullable_text(&raw) {
        Some(text) => {
            *slot = text;
            None
        }
        None => Some(raw),
    }
}

/// Store a parsed override, or hand the raw value back for `extra`.
fn replace<T>(
    slot: &mut Option<Option<T>>,
    parsed: Option<Option<T>>,
    raw: Value,
) -> Option<Value> {
    match parsed {
        Some(value) => {
            *slot = Some(value);
            None
        }
        None => Some(raw),
    }
}

/// Claim request body for OpenAPI documentation.
/// Note: The handler deserializes into `ClaimItemDto`, which also accepts
/// found-item fields as overrides and keeps arbitrary extra keys. The body
/// may be omitted.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ClaimItemDocDto {
    /// Claimant's name
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// Claimant's phone
    #[schema(example = "555-1234")]
    pub phone: Option<String>,
    /// Claimant's institutional id
    #[schema(example = "S1")]
    pub sap_id: Option<String>,
    /// Claimant's email
    pub email: Option<String>,
}

/// Found item submission form for OpenAPI documentation.
/// Note: The handler reads axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitFoundItemDto {
    /// The item image (required)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub item_image: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    pub place: Option<String>,
    /// Finder's name
    pub owner_name: Option<String>,
    pub details: Option<String>,
    #[schema(example = "true")]
    pub is_identifiable: Option<String>,
}

/// Lost item submission form for OpenAPI documentation.
/// Note: The handler reads axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitLostItemDto {
    /// The item image (optional)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub item_image: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub sap_id: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub item_name: Option<String>,
    pub place: Option<String>,
}
