use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::features::pages::handlers::{
    about, confirm, faq, found_form, found_submit, home, login_form, login_submit, lost_form,
    lost_submit, signout, PagesState,
};

/// HTML page routes. Session checks happen per page through the auth gate.
pub fn routes(state: PagesState, max_upload_size: usize) -> Router {
    Router::new()
        .route("/login", get(login_form).post(login_submit))
        .route("/home", get(home))
        .route(
            "/lost",
            get(lost_form)
                .post(lost_submit)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route(
            "/found",
            get(found_form)
                .post(found_submit)
                .layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/confirm", get(confirm))
        .route("/about", get(about))
        .route("/faq", get(faq))
        .route("/signout", get(signout))
        .with_state(state)
}
