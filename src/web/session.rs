//! Auth cookie helpers shared by the login handlers and the auth gate.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use cookie::{Cookie, SameSite, time::Duration};

use crate::error::AppError;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "auth";

/// Extracts the auth cookie value from the request headers.
///
/// All `Cookie` headers are scanned; malformed pairs are skipped.
pub fn auth_cookie_value(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

fn build_cookie(value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Cookie granted after a successful login.
pub fn build_auth_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    build_cookie(token, Duration::seconds(max_age_secs))
}

/// Cookie that clears the auth cookie in the browser.
pub fn build_expired_auth_cookie() -> Cookie<'static> {
    build_cookie(String::new(), Duration::ZERO)
}

/// Serializes `cookie` into a `Set-Cookie` header value.
pub fn set_cookie_value(cookie: &Cookie<'_>) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::internal(format!("Invalid cookie header: {e}")))
}
