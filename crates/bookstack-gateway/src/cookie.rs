//! Session cookie handling.
//!
//! The session token travels in a `TOKEN` cookie. This module parses
//! the request `Cookie` header and builds the `Set-Cookie` values for
//! login and logout.

use axum::http::HeaderMap;

use bookstack_auth::{SESSION_MAX_AGE_SECS, TOKEN_COOKIE};

/// Extract the session token value from the request headers.
///
/// Returns `None` when no `Cookie` header is present or no `TOKEN`
/// cookie is among the pairs.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?.trim();
        if name == TOKEN_COOKIE {
            return Some(parts.next().unwrap_or("").trim().to_string());
        }
    }
    None
}

/// Build the `Set-Cookie` value establishing a session.
///
/// The cookie is scoped to the whole site, HTTP-only, `SameSite=Lax`,
/// and expires after [`SESSION_MAX_AGE_SECS`].
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={token}; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; SameSite=Lax; HttpOnly")
}

/// Build the `Set-Cookie` value clearing the session.
///
/// Uses both `Max-Age=0` and an epoch `Expires` so every browser drops
/// the cookie immediately.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!(
        "{TOKEN_COOKIE}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Lax; HttpOnly"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    fn headers_with(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let headers = headers_with("theme=dark; TOKEN=7; lang=en");
        assert_eq!(token_from_headers(&headers).as_deref(), Some("7"));
    }

    #[test]
    fn missing_cookie_header_is_none() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn other_cookies_only_is_none() {
        let headers = headers_with("theme=dark");
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn empty_token_value_is_preserved() {
        let headers = headers_with("TOKEN=");
        assert_eq!(token_from_headers(&headers).as_deref(), Some(""));
    }

    #[test]
    fn session_cookie_attributes() {
        let value = session_cookie("42");
        assert!(value.starts_with("TOKEN=42;"));
        assert!(value.contains("Max-Age=3600"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn clear_cookie_expires_in_the_past() {
        let value = clear_session_cookie();
        assert!(value.starts_with("TOKEN=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("Expires=Thu, 01 Jan 1970"));
    }
}
