use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope for API responses and errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_keys() {
        let ok = serde_json::to_value(ApiResponse::success(Some(1), None)).unwrap();
        assert_eq!(
            ok,
            json!({ "success": true, "data": 1, "message": null, "errors": null })
        );

        let err = serde_json::to_value(ApiResponse::<()>::error(
            Some("Item not found".to_string()),
            None,
        ))
        .unwrap();
        assert_eq!(err["success"], false);
        assert!(err.get("meta").is_none());
    }
}
