//! External identity provider redirect (`/`, `/auth-callback`).
//!
//! Authorization-code flow against an Azure AD style authority. It is not
//! tied to the session model: a successful callback only lands on `/home`,
//! where the regular session check still applies.

pub mod client;
pub mod handlers;
pub mod routes;

pub use client::IdentityClient;
pub use routes::routes;
