use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::features::items::handlers::{
    claim_item, get_all_items, get_lost_items, submit_found_item, submit_lost_item,
};
use crate::features::items::services::ItemService;
use crate::modules::storage::{ImageCategory, LocalImageStorage};
use crate::shared::constants::{FOUND_ITEM_IMAGES_DIR, LOST_ITEM_IMAGES_DIR};

/// Create routes for the items feature (all session protected)
pub fn routes(item_service: Arc<ItemService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/api/submitFoundItem",
            post(submit_found_item).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/api/submitLostItem",
            post(submit_lost_item).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/getAllItems", post(get_all_items))
        .route("/getLostItems", post(get_lost_items))
        .route("/claimItem/{id}", post(claim_item))
        .with_state(item_service)
}

/// Public static routes serving uploaded images
pub fn image_routes(storage: &LocalImageStorage) -> Router {
    Router::new()
        .nest_service(
            &format!("/{}", FOUND_ITEM_IMAGES_DIR),
            ServeDir::new(storage.folder_path(ImageCategory::Found)),
        )
        .nest_service(
            &format!("/{}", LOST_ITEM_IMAGES_DIR),
            ServeDir::new(storage.folder_path(ImageCategory::Lost)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{item_router, test_item_service};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_item_routes_require_a_session() {
        let (service, _, _) = test_item_service();
        let server = TestServer::new(item_router(service)).unwrap();

        server
            .post("/getAllItems")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/getLostItems")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_uploaded_images_are_served() {
        let (_, _, storage) = test_item_service();
        let filename = storage
            .save(ImageCategory::Lost, "itemImage", "scarf.jpg", b"scarf-bytes")
            .await
            .unwrap();

        let server = TestServer::new(image_routes(&storage)).unwrap();
        let response = server
            .get(&format!("/{}/{}", LOST_ITEM_IMAGES_DIR, filename))
            .await;
        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), b"scarf-bytes");

        server
            .get(&format!("/{}/{}", FOUND_ITEM_IMAGES_DIR, filename))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
