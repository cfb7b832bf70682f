use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::middleware::session_token;
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::{Admission, AuthGate, LoginAttempt, RouteAccess, SessionService};
use crate::features::items::handlers::read_submission;
use crate::features::items::ItemService;
use crate::features::pages::templates::render_page;
use crate::shared::constants::{DEMO_EMAIL, DEMO_PASSWORD, LOGIN_PATH, SESSION_COOKIE_NAME};

const LOGIN_FAILED: &str = "Login failed. Please try again.";

#[derive(Clone)]
pub struct PagesState {
    pub sessions: Arc<SessionService>,
    pub items: Arc<ItemService>,
    pub cookie_secure: bool,
}

/// Resolve the gate for this request from its session cookie or bearer token
async fn resolve_gate(state: &PagesState, headers: &HeaderMap) -> AuthGate {
    let mut gate = AuthGate::new();
    gate.init(&state.sessions, session_token(headers).as_deref())
        .await;
    gate
}

/// Admit a request to a page, or produce the response to send instead
async fn admit(
    state: &PagesState,
    headers: &HeaderMap,
    access: RouteAccess,
) -> std::result::Result<AuthGate, Response> {
    let gate = resolve_gate(state, headers).await;
    match gate.admit(access) {
        Admission::Render => Ok(gate),
        Admission::RedirectToLogin => Err(Redirect::to(LOGIN_PATH).into_response()),
        Admission::Placeholder => Err(match render_page("loading.html", context! {}) {
            Ok(page) => page.into_response(),
            Err(e) => AppError::from(e).into_response(),
        }),
    }
}

fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn login_page(status: StatusCode, email: &str, error: Option<&str>) -> Result<Response> {
    let page = render_page(
        "login.html",
        context! {
            email => email,
            error => error,
            demo_email => DEMO_EMAIL,
            demo_password => DEMO_PASSWORD,
        },
    )?;
    Ok((status, page).into_response())
}

pub async fn login_form() -> Result<Response> {
    login_page(StatusCode::OK, "", None)
}

pub async fn login_submit(
    State(state): State<PagesState>,
    Form(dto): Form<LoginRequestDto>,
) -> Result<Response> {
    if dto.validate().is_err() {
        return login_page(StatusCode::BAD_REQUEST, &dto.email, Some(LOGIN_FAILED));
    }

    let email = dto.email.clone();
    let Some(issued) = LoginAttempt::start(state.sessions.clone(), dto)
        .outcome()
        .await?
    else {
        return login_page(StatusCode::UNAUTHORIZED, &email, Some(LOGIN_FAILED));
    };

    let cookie = session_cookie(&issued.token, issued.expires_in, state.cookie_secure);
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;

    let mut response = Redirect::to("/home").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

pub async fn home(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    let gate = match admit(&state, &headers, RouteAccess::Protected).await {
        Ok(gate) => gate,
        Err(response) => return Ok(response),
    };

    let items = state.items.list_found().await?;
    let page = render_page("home.html", context! { user => gate.user(), items => items })?;
    Ok(page.into_response())
}

pub async fn lost_form(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    protected_page(&state, &headers, "lost.html").await
}

pub async fn found_form(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    protected_page(&state, &headers, "found.html").await
}

pub async fn confirm(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    protected_page(&state, &headers, "confirm.html").await
}

pub async fn lost_submit(
    State(state): State<PagesState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response> {
    let gate = match admit(&state, &headers, RouteAccess::Protected).await {
        Ok(gate) => gate,
        Err(response) => return Ok(response),
    };

    let outcome = match read_submission(multipart).await {
        Ok(submission) => state.items.submit_lost(submission).await.map(|_| ()),
        Err(e) => Err(e),
    };
    submission_response(outcome, &gate, "lost.html")
}

pub async fn found_submit(
    State(state): State<PagesState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response> {
    let gate = match admit(&state, &headers, RouteAccess::Protected).await {
        Ok(gate) => gate,
        Err(response) => return Ok(response),
    };

    let outcome = match read_submission(multipart).await {
        Ok(submission) => state.items.submit_found(submission).await.map(|_| ()),
        Err(e) => Err(e),
    };
    submission_response(outcome, &gate, "found.html")
}

/// Stored submissions go to the confirmation page; bad input re-renders the form
fn submission_response(outcome: Result<()>, gate: &AuthGate, form: &str) -> Result<Response> {
    match outcome {
        Ok(()) => Ok(Redirect::to("/confirm").into_response()),
        Err(AppError::BadRequest(message)) => {
            let page = render_page(form, context! { user => gate.user(), error => message })?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn about(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    public_page(&state, &headers, "about.html").await
}

pub async fn faq(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    public_page(&state, &headers, "faq.html").await
}

/// Revoke the session and clear the cookie
pub async fn signout(State(state): State<PagesState>, headers: HeaderMap) -> Result<Response> {
    let mut gate = resolve_gate(&state, &headers).await;
    gate.logout(&state.sessions).await;

    let cookie = HeaderValue::from_str(&session_cookie("", 0, state.cookie_secure))
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;

    let mut response = render_page("signout.html", context! {})?.into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

async fn protected_page(state: &PagesState, headers: &HeaderMap, name: &str) -> Result<Response> {
    page(state, headers, RouteAccess::Protected, name).await
}

async fn public_page(state: &PagesState, headers: &HeaderMap, name: &str) -> Result<Response> {
    page(state, headers, RouteAccess::Public, name).await
}

async fn page(
    state: &PagesState,
    headers: &HeaderMap,
    access: RouteAccess,
    name: &str,
) -> Result<Response> {
    let gate = match admit(state, headers, access).await {
        Ok(gate) => gate,
        Err(response) => return Ok(response),
    };

    Ok(render_page(name, context! { user => gate.user() })?.into_response())
}
