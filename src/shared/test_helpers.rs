#[cfg(test)]
use crate::core::config::{SessionConfig, UploadConfig};
#[cfg(test)]
use crate::core::middleware::auth_middleware;
#[cfg(test)]
use crate::features::auth::model::{AuthenticatedSession, SessionUser};
#[cfg(test)]
use crate::features::auth::{routes as auth_routes, SessionService};
#[cfg(test)]
use crate::features::items::repository::memory::InMemoryItemRepository;
#[cfg(test)]
use crate::features::items::{routes as item_routes, ItemService};
#[cfg(test)]
use crate::features::pages::{routes as page_routes, PagesState};
#[cfg(test)]
use crate::modules::storage::LocalImageStorage;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
const TEST_UPLOAD_LIMIT: usize = 1024 * 1024;

#[cfg(test)]
pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: "test-session-secret".to_string(),
        ttl: Duration::from_secs(3600),
        login_delay: Duration::ZERO,
        cookie_secure: false,
    }
}

#[cfg(test)]
pub fn test_session_service() -> Arc<SessionService> {
    Arc::new(SessionService::new(&test_session_config()))
}

/// Upload root in a fresh temporary directory
#[cfg(test)]
pub fn temp_upload_config() -> UploadConfig {
    let root = std::env::temp_dir().join(format!("lostfound-test-{}", uuid::Uuid::new_v4()));
    UploadConfig { root }
}

/// Auth API routes, protected ones behind the session middleware
#[cfg(test)]
pub fn session_router(sessions: Arc<SessionService>) -> Router {
    Router::new()
        .merge(auth_routes::public_routes(sessions.clone()))
        .merge(
            auth_routes::protected_routes(sessions.clone()).route_layer(
                axum::middleware::from_fn_with_state(sessions, auth_middleware),
            ),
        )
}

#[cfg(test)]
pub fn test_item_service() -> (
    Arc<ItemService>,
    Arc<InMemoryItemRepository>,
    Arc<LocalImageStorage>,
) {
    let repository = Arc::new(InMemoryItemRepository::default());
    let storage = Arc::new(LocalImageStorage::new(&temp_upload_config()));
    let service = Arc::new(ItemService::new(repository.clone(), storage.clone()));
    (service, repository, storage)
}

/// Item routes without the session middleware
#[cfg(test)]
pub fn item_router(service: Arc<ItemService>) -> Router {
    item_routes(service, TEST_UPLOAD_LIMIT)
}

#[cfg(test)]
pub fn create_test_session() -> AuthenticatedSession {
    AuthenticatedSession {
        user: SessionUser {
            id: "user-1700000000000".to_string(),
            email: "tester@campus.edu".to_string(),
            name: "tester".to_string(),
            is_demo: false,
        },
        session_id: "test-session-id".to_string(),
        expires_at: chrono::Utc::now().timestamp() + 3600,
    }
}

#[cfg(test)]
async fn inject_session_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_session());
    next.run(request).await
}

#[cfg(test)]
pub fn with_session_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_session_middleware))
}

/// Page routes over an in-memory item store
#[cfg(test)]
pub fn pages_server() -> (axum_test::TestServer, Arc<InMemoryItemRepository>) {
    let (items, repository, _) = test_item_service();
    let state = PagesState {
        sessions: test_session_service(),
        items,
        cookie_secure: false,
    };
    let server = axum_test::TestServer::new(page_routes(state, TEST_UPLOAD_LIMIT)).unwrap();
    (server, repository)
}
