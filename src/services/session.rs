use axum::http::{HeaderMap, header};

use crate::config::SessionConfig;

/// Reads the session token from the `Cookie` header, falling back to an
/// `Authorization: Bearer` header for non-browser clients.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|c| c.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
    })
}

pub fn session_cookie(config: &SessionConfig, token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}{}",
        config.cookie_name,
        token,
        config.ttl_hours * 3600,
        if config.cookie_secure { "; Secure" } else { "" }
    )
}

pub fn clear_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0{}",
        config.cookie_name,
        if config.cookie_secure { "; Secure" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn finds_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=abc.def; lang=en"),
        );
        assert_eq!(
            token_from_headers(&headers, "admin_session"),
            Some("abc.def".to_string())
        );
        assert_eq!(token_from_headers(&headers, "other"), None);
    }

    #[test]
    fn falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok.sig"));
        assert_eq!(
            token_from_headers(&headers, "admin_session"),
            Some("tok.sig".to_string())
        );
    }

    #[test]
    fn cookie_strings() {
        let config = SessionConfig::default();
        assert_eq!(
            session_cookie(&config, "t"),
            "admin_session=t; Path=/; HttpOnly; SameSite=Strict; Max-Age=86400"
        );
        assert!(clear_session_cookie(&config).contains("Max-Age=0"));
    }
}
