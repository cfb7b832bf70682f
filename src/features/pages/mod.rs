//! Server-rendered HTML shell.
//!
//! | Path       | Access    |
//! |------------|-----------|
//! | /login     | public    |
//! | /about     | public    |
//! | /faq       | public    |
//! | /signout   | public    |
//! | /home      | protected |
//! | /lost      | protected |
//! | /found     | protected |
//! | /confirm   | protected |
//!
//! Protected pages resolve an [`AuthGate`](crate::features::auth::AuthGate)
//! from the `lf_session` cookie and redirect to `/login` when it does not
//! admit them.

pub mod handlers;
pub mod routes;
pub mod templates;

pub use handlers::PagesState;
pub use routes::routes;
