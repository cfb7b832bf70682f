use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::SessionUser;
use crate::features::items::dtos::{
    ClaimItemDocDto, ClaimItemDto, SubmitFoundItemDto, SubmitLostItemDto,
};
use crate::features::items::handlers::read_submission;
use crate::features::items::models::{FoundItem, LostItem};
use crate::features::items::services::ItemService;

/// Report a found item
///
/// Accepts multipart/form-data with the `itemImage` file (required) and the
/// found-item text fields. Unknown fields are ignored.
#[utoipa::path(
    post,
    path = "/api/submitFoundItem",
    tag = "items",
    request_body(
        content = SubmitFoundItemDto,
        content_type = "multipart/form-data",
        description = "Found item form with a required item image",
    ),
    responses(
        (status = 200, description = "Found item stored"),
        (status = 400, description = "Missing image or malformed field"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_found_item(
    user: SessionUser,
    State(service): State<Arc<ItemService>>,
    multipart: Multipart,
) -> Result<StatusCode> {
    let submission = read_submission(multipart).await?;
    let stored = service.submit_found(submission).await?;
    debug!("Found item {} submitted by {}", stored.id, user.id);
    Ok(StatusCode::OK)
}

/// Report a lost item
///
/// Same form handling as found items, but the image is optional.
#[utoipa::path(
    post,
    path = "/api/submitLostItem",
    tag = "items",
    request_body(
        content = SubmitLostItemDto,
        content_type = "multipart/form-data",
        description = "Lost item form with an optional item image",
    ),
    responses(
        (status = 200, description = "Lost item stored"),
        (status = 400, description = "Malformed form"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_lost_item(
    user: SessionUser,
    State(service): State<Arc<ItemService>>,
    multipart: Multipart,
) -> Result<StatusCode> {
    let submission = read_submission(multipart).await?;
    let stored = service.submit_lost(submission).await?;
    debug!("Lost item {} submitted by {}", stored.id, user.id);
    Ok(StatusCode::OK)
}

/// List every found item
#[utoipa::path(
    post,
    path = "/getAllItems",
    tag = "items",
    responses(
        (status = 200, description = "All found items, oldest first", body = Vec<FoundItem>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_all_items(
    _user: SessionUser,
    State(service): State<Arc<ItemService>>,
) -> Result<Json<Vec<FoundItem>>> {
    Ok(Json(service.list_found().await?))
}

/// List every lost item
#[utoipa::path(
    post,
    path = "/getLostItems",
    tag = "items",
    responses(
        (status = 200, description = "All lost items, oldest first", body = Vec<LostItem>),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_lost_items(
    _user: SessionUser,
    State(service): State<Arc<ItemService>>,
) -> Result<Json<Vec<LostItem>>> {
    Ok(Json(service.list_lost().await?))
}

/// Claim a found item
///
/// Moves the found item into the collected archive together with the
/// claimant fields from the body.
#[utoipa::path(
    post,
    path = "/claimItem/{id}",
    tag = "items",
    params(
        ("id" = String, Path, description = "Found item id")
    ),
    request_body(
        content = ClaimItemDocDto,
        description = "Optional claim details; a missing body is an empty claim",
    ),
    responses(
        (status = 200, description = "Item claimed"),
        (status = 400, description = "Malformed JSON body"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item not found"),
        (status = 500, description = "Store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn claim_item(
    user: SessionUser,
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
    body: Option<AppJson<ClaimItemDto>>,
) -> Result<StatusCode> {
    let dto = body.map(|AppJson(dto)| dto).unwrap_or_default();
    let collected = service.claim(&id, dto).await?;
    debug!("Item {} claimed by {}", collected.found_item_id, user.id);
    Ok(StatusCode::OK)
}
