// =============================================================================
// SESSION
// =============================================================================

/// Cookie carrying the session token for browser pages
pub const SESSION_COOKIE_NAME: &str = "lf_session";

/// Path of the login page protected routes redirect to
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// DEMO ACCOUNT
// =============================================================================

/// Hardcoded credential pair accepted by the mocked login
pub const DEMO_EMAIL: &str = "demo@lostandfound.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_USER_ID: &str = "demo-user-123";

// =============================================================================
// UPLOADS
// =============================================================================

/// Multipart field carrying the item image
pub const ITEM_IMAGE_FIELD: &str = "itemImage";

pub const FOUND_ITEM_IMAGES_DIR: &str = "foundItemImages";
pub const LOST_ITEM_IMAGES_DIR: &str = "lostItemImages";
