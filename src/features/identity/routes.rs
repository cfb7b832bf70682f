use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::identity::client::IdentityClient;
use crate::features::identity::handlers::{auth_callback, sign_in};

pub fn routes(identity: Option<Arc<IdentityClient>>) -> Router {
    Router::new()
        .route("/", get(sign_in))
        .route("/auth-callback", get(auth_callback))
        .with_state(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::IdentityProviderConfig;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;

    fn client(authority: &str) -> Arc<IdentityClient> {
        Arc::new(IdentityClient::new(IdentityProviderConfig {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            authority: authority.to_string(),
            redirect_uri: "http://localhost:5000/auth-callback".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_root_falls_back_to_login_without_provider() {
        let server = TestServer::new(routes(None)).unwrap();

        let response = server.get("/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(header::LOCATION), "/login");
    }

    #[tokio::test]
    async fn test_root_redirects_to_provider() {
        let server = TestServer::new(routes(Some(client("https://login.example.com/t")))).unwrap();

        let response = server.get("/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header(header::LOCATION);
        assert!(location
            .to_str()
            .unwrap()
            .starts_with("https://login.example.com/t/oauth2/v2.0/authorize?"));
    }

    #[tokio::test]
    async fn test_root_with_broken_authority_is_server_error() {
        let server = TestServer::new(routes(Some(client("::nope")))).unwrap();

        let response = server.get("/").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Authentication error");
    }

    #[tokio::test]
    async fn test_failed_exchange_is_server_error() {
        let server = TestServer::new(routes(Some(client("http://127.0.0.1:1/t")))).unwrap();

        let response = server.get("/auth-callback").add_query_param("code", "abc").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Error during token acquisition.");
    }
}
