use reqwest::Url;
use serde::Deserialize;

use crate::core::config::IdentityProviderConfig;
use crate::core::error::{AppError, Result};

const SCOPE: &str = "user.read";

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// Authorization-code client for the external identity provider
pub struct IdentityClient {
    config: IdentityProviderConfig,
    client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// URL the browser is sent to for sign-in
    pub fn authorize_url(&self) -> Result<String> {
        let base = self.endpoint("authorize")?;
        Ok(format!(
            "{}?client_id={}&response_type=code&response_mode=query&scope={}&redirect_uri={}",
            base,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(SCOPE),
            urlencoding::encode(&self.config.redirect_uri),
        ))
    }

    /// Redeem an authorization code at the token endpoint
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let url = self.endpoint("token")?;

        let response = self
            .client
            .post(url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("scope", SCOPE),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Token request failed: HTTP {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Invalid token response: {}", e)))
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Url::parse(&format!("{}/oauth2/v2.0/{}", self.config.authority, name)).map_err(|e| {
            AppError::Internal(format!(
                "Invalid identity authority '{}': {}",
                self.config.authority, e
            ))
        })
    }
}
