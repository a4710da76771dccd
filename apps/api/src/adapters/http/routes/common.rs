//! Shared types, helpers, and the session cookie for dashboard routes.

// Core framework - re-exported for use by sibling modules
pub use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
pub use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
pub use chrono::Utc;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
pub use uuid::Uuid;

// App-level imports
pub use crate::adapters::http::app_state::AppState;
pub use crate::app_error::{AppError, AppResult};
pub use crate::domain::entities::pending_payment::SessionKey;

pub(crate) const SESSION_COOKIE: &str = "dues_session";

/// Returns the caller's session, minting a cookie if there is none.
///
/// The cookie has no max-age; it lives as long as the browser session.
pub(crate) fn ensure_session(jar: CookieJar, secure: bool) -> (CookieJar, SessionKey) {
    if let Some(session) = current_session(&jar) {
        return (jar, session);
    }

    let session = SessionKey::generate();
    let cookie = Cookie::build((SESSION_COOKIE, session.as_str().to_owned()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    (jar.add(cookie), session)
}

pub(crate) fn current_session(jar: &CookieJar) -> Option<SessionKey> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().trim())
        .filter(|v| !v.is_empty())
        .map(SessionKey::new)
}
