use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto};
use crate::features::auth::model::{AuthenticatedSession, SessionUser};
use crate::features::auth::services::{LoginAttempt, SessionService};
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Login with any non-empty email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let issued = LoginAttempt::start(service, dto)
        .outcome()
        .await?
        .ok_or_else(|| AppError::Unauthorized("Login failed. Please try again.".to_string()))?;

    Ok(Json(ApiResponse::success(
        Some(AuthResponseDto {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: issued.user,
        }),
        None,
    )))
}

/// Revoke the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    session: AuthenticatedSession,
    State(service): State<Arc<SessionService>>,
) -> Json<ApiResponse<()>> {
    service.logout(&session).await;
    Json(ApiResponse::success(None, Some("Signed out".to_string())))
}

/// Get the current session user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<SessionUser>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(session: AuthenticatedSession) -> Json<ApiResponse<SessionUser>> {
    Json(ApiResponse::success(Some(session.user), None))
}
