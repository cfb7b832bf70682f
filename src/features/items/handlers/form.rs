use axum::extract::Multipart;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{ItemSubmission, UploadedImage};
use crate::shared::constants::ITEM_IMAGE_FIELD;

/// Read an item form.
///
/// Text parts are collected by name. The `itemImage` part is the only file
/// accepted; a browser's empty file input (no filename, no bytes) counts as
/// no image.
pub async fn read_submission(mut multipart: Multipart) -> Result<ItemSubmission> {
    let mut submission = ItemSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == ITEM_IMAGE_FIELD {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read image bytes: {}", e);
                AppError::BadRequest(format!("Failed to read image data: {}", e))
            })?;

            if filename.is_empty() && data.is_empty() {
                continue;
            }
            if submission.image.is_some() {
                return Err(AppError::BadRequest(
                    "Only one item image may be uploaded".to_string(),
                ));
            }
            submission.image = Some(UploadedImage {
                filename,
                data: data.to_vec(),
            });
        } else if field.file_name().is_some() {
            debug!("Ignoring unexpected file field: {}", name);
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
            })?;
            submission.fields.insert(name, value);
        }
    }

    Ok(submission)
}
