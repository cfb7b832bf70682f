mod login_attempt;
mod session_service;

pub use login_attempt::LoginAttempt;
pub use session_service::SessionService;
