//! Session-based authentication.
//!
//! Login accepts any non-empty credential pair (plus a fixed demo account)
//! and issues a signed session token. The token is verified server-side on
//! every protected request, and logout revokes it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Start a session |
//! | POST | `/api/auth/logout` | Yes | Revoke the current session |
//! | GET | `/api/auth/me` | Yes | Current session user |

pub mod dtos;
pub mod gate;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use gate::{Admission, AuthGate, RouteAccess};
pub use services::{LoginAttempt, SessionService};
