use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::{AuthenticatedSession, SessionUser};

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    email: String,
    name: String,
    is_demo: bool,
    jti: String,
    iat: i64,
    exp: i64,
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Issues, verifies and revokes signed session tokens.
///
/// Tokens are HS256 JWTs. Logout records the token id in an in-process
/// revocation list until the token would have expired anyway.
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    login_delay: Duration,
    revoked: RwLock<HashMap<String, i64>>,
}

impl SessionService {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.ttl,
            login_delay: config.login_delay,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    /// Accept the credentials and issue a session for the resulting user
    pub fn login(&self, dto: &LoginRequestDto) -> Result<IssuedSession> {
        let now = Utc::now();
        let user = SessionUser::from_credentials(&dto.email, &dto.password, now.timestamp_millis());

        let iat = now.timestamp();
        let expires_in = self.ttl.as_secs() as i64;
        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            is_demo: user.is_demo,
            jti: Uuid::now_v7().to_string(),
            iat,
            exp: iat + expires_in,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        tracing::info!(
            "Session issued: user_id={}, demo={}, jti={}",
            user.id,
            user.is_demo,
            claims.jti
        );

        Ok(IssuedSession {
            token,
            expires_in,
            user,
        })
    }

    /// Verify signature, expiry and revocation of a session token
    pub async fn verify(&self, token: &str) -> Result<AuthenticatedSession> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))?
            .claims;

        if self.revoked.read().await.contains_key(&claims.jti) {
            return Err(AppError::Unauthorized("Session has been signed out".to_string()));
        }

        Ok(AuthenticatedSession {
            user: SessionUser {
                id: claims.sub,
                email: claims.email,
                name: claims.name,
                is_demo: claims.is_demo,
            },
            session_id: claims.jti,
            expires_at: claims.exp,
        })
    }

    /// Revoke a session. Later verification of its token fails.
    pub async fn logout(&self, session: &AuthenticatedSession) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session.session_id.clone(), session.expires_at);

        tracing::info!(
            "Session revoked: user_id={}, jti={}",
            session.user.id,
            session.session_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_session_config;

    fn credentials(email: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_issued_token_verifies_to_same_user() {
        let service = SessionService::new(&test_session_config());
        let issued = service.login(&credentials("carol@campus.edu", "pw")).unwrap();

        let session = service.verify(&issued.token).await.unwrap();
        assert_eq!(session.user, issued.user);
        assert_eq!(session.user.name, "carol");
        assert!(session.expires_at > Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let service = SessionService::new(&test_session_config());
        let issued = service.login(&credentials("dave@campus.edu", "pw")).unwrap();
        let session = service.verify(&issued.token).await.unwrap();

        service.logout(&session).await;

        assert!(matches!(
            service.verify(&issued.token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let service = SessionService::new(&test_session_config());
        let mut other_config = test_session_config();
        other_config.secret = "another-secret".to_string();
        let other = SessionService::new(&other_config);

        let issued = other.login(&credentials("eve@campus.edu", "pw")).unwrap();
        assert!(service.verify(&issued.token).await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let service = SessionService::new(&test_session_config());
        assert!(service.verify("not-a-token").await.is_err());
    }

    #[tokio::test]
    async fn test_each_login_gets_its_own_session_id() {
        let service = SessionService::new(&test_session_config());
        let first = service.login(&credentials("demo@lostandfound.com", "demo123")).unwrap();
        let second = service.login(&credentials("demo@lostandfound.com", "demo123")).unwrap();

        let first_session = service.verify(&first.token).await.unwrap();
        let second_session = service.verify(&second.token).await.unwrap();
        assert_ne!(first_session.session_id, second_session.session_id);

        // Signing out one demo session leaves the other alive
        service.logout(&first_session).await;
        assert!(service.verify(&first.token).await.is_err());
        assert!(service.verify(&second.token).await.is_ok());
    }
}
