use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD, DEMO_USER_ID};

/// User carried by a session. Fabricated at login, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_demo: bool,
}

impl SessionUser {
    pub fn demo() -> Self {
        Self {
            id: DEMO_USER_ID.to_string(),
            email: DEMO_EMAIL.to_string(),
            name: DEMO_NAME.to_string(),
            is_demo: true,
        }
    }

    /// Build the user for a credential pair.
    ///
    /// The demo pair maps to the demo user; anything else is accepted as a
    /// fresh user named after the local part of the email.
    pub fn from_credentials(email: &str, password: &str, now_millis: i64) -> Self {
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            return Self::demo();
        }

        let name = email.split('@').next().unwrap_or_default().to_string();

        Self {
            id: format!("user-{}", now_millis),
            email: email.to_string(),
            name,
            is_demo: false,
        }
    }
}

/// A verified session placed in request extensions by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: SessionUser,
    /// Token id (`jti`), used for revocation
    pub session_id: String,
    /// Unix timestamp (seconds) at which the token expires
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_credentials_map_to_demo_user() {
        let user = SessionUser::from_credentials(DEMO_EMAIL, DEMO_PASSWORD, 42);
        assert_eq!(user, SessionUser::demo());
        assert!(user.is_demo);
    }

    #[test]
    fn test_any_credentials_are_accepted() {
        let user = SessionUser::from_credentials("alice@campus.edu", "whatever", 1700000000000);
        assert_eq!(user.id, "user-1700000000000");
        assert_eq!(user.email, "alice@campus.edu");
        assert_eq!(user.name, "alice");
        assert!(!user.is_demo);
    }

    #[test]
    fn test_demo_email_with_wrong_password_is_regular_user() {
        let user = SessionUser::from_credentials(DEMO_EMAIL, "nope", 7);
        assert!(!user.is_demo);
        assert_eq!(user.name, "demo");
        assert_eq!(user.id, "user-7");
    }

    #[test]
    fn test_email_without_at_sign_uses_whole_value_as_name() {
        let user = SessionUser::from_credentials("bob", "pw", 1);
        assert_eq!(user.name, "bob");
    }
}
