//! Route admission for the page shell.
//!
//! The gate starts in `Loading`, resolves to `Authenticated` or
//! `Unauthenticated` once the presented session has been checked, and is
//! moved by login and logout. Pages ask it whether they may render.

use crate::features::auth::model::{AuthenticatedSession, SessionUser};
use crate::features::auth::services::SessionService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Authenticated(SessionUser),
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Render,
    RedirectToLogin,
    Placeholder,
}

#[derive(Debug)]
pub struct AuthGate {
    state: GateState,
    session: Option<AuthenticatedSession>,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
            session: None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match &self.state {
            GateState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Resolve the gate from the token presented with a request
    pub async fn init(&mut self, sessions: &SessionService, token: Option<&str>) {
        let verified = match token {
            Some(token) => sessions.verify(token).await.ok(),
            None => None,
        };

        match verified {
            Some(session) => self.authenticate(session),
            None => {
                self.session = None;
                self.state = GateState::Unauthenticated;
            }
        }
    }

    pub fn authenticate(&mut self, session: AuthenticatedSession) {
        self.state = GateState::Authenticated(session.user.clone());
        self.session = Some(session);
    }

    /// Revoke the current session (if any) and drop to `Unauthenticated`
    pub async fn logout(&mut self, sessions: &SessionService) {
        if let Some(session) = self.session.take() {
            sessions.logout(&session).await;
        }
        self.state = GateState::Unauthenticated;
    }

    pub fn admit(&self, access: RouteAccess) -> Admission {
        match (access, &self.state) {
            (RouteAccess::Public, _) => Admission::Render,
            (RouteAccess::Protected, GateState::Loading) => Admission::Placeholder,
            (RouteAccess::Protected, GateState::Authenticated(_)) => Admission::Render,
            (RouteAccess::Protected, GateState::Unauthenticated) => Admission::RedirectToLogin,
        }
    }
}
