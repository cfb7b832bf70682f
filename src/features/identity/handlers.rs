use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::features::identity::client::IdentityClient;
use crate::shared::constants::LOGIN_PATH;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Entry point. Sends the browser to the identity provider when one is
/// configured, otherwise to the login page.
pub async fn sign_in(State(identity): State<Option<Arc<IdentityClient>>>) -> Response {
    let Some(identity) = identity else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match identity.authorize_url() {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            tracing::error!("Error generating auth URL: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Authentication error").into_response()
        }
    }
}

/// Provider callback. The acquired token is logged and discarded; it does
/// not open a session.
pub async fn auth_callback(
    State(identity): State<Option<Arc<IdentityClient>>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let outcome = match (identity, query.code) {
        (Some(identity), Some(code)) => identity
            .exchange_code(&code)
            .await
            .map_err(|e| e.to_string()),
        (None, _) => Err("identity provider is not configured".to_string()),
        (_, None) => Err("callback carried no authorization code".to_string()),
    };

    match outcome {
        Ok(token) => {
            tracing::info!(
                "Identity provider token acquired (length={}, expires_in={})",
                token.access_token.len(),
                token.expires_in
            );
            Redirect::to("/home").into_response()
        }
        Err(e) => {
            tracing::error!("Error during token acquisition: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error during token acquisition.",
            )
                .into_response()
        }
    }
}
