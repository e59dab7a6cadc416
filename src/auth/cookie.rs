//! Cookie transport for the signed credential.

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};

/// Cookie carrying the signed credential.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Build the Set-Cookie value delivering a freshly issued credential.
///
/// SameSite=None because the frontend is served from a different origin
/// than the API. Secure is configuration-controlled so plain-HTTP
/// development setups can still authenticate.
pub fn access_cookie(
    token: &str,
    max_age_secs: u64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=None; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the clearing Set-Cookie used on logout.
pub fn clear_access_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{ACCESS_TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=None; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Extract the credential from the request's Cookie header, if present.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = match parts.next() {
            Some(k) => k.trim(),
            None => continue,
        };
        let val = match parts.next() {
            Some(v) => v.trim(),
            None => continue,
        };
        if key == ACCESS_TOKEN_COOKIE {
            return Some(val.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_cookie_carries_required_attributes() {
        let cookie = access_cookie("abc.def.ghi", 3600, true).unwrap();
        let s = cookie.to_str().unwrap();
        assert!(s.starts_with("access_token=abc.def.ghi"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("SameSite=None"));
        assert!(s.contains("Max-Age=3600"));
        assert!(s.contains("Path=/"));
        assert!(s.contains("Secure"));
    }

    #[test]
    fn insecure_cookie_omits_secure_attribute() {
        let cookie = access_cookie("abc", 3600, false).unwrap();
        assert!(!cookie.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        let cookie = clear_access_cookie(true).unwrap();
        let s = cookie.to_str().unwrap();
        assert!(s.starts_with("access_token=;"));
        assert!(s.contains("Max-Age=0"));
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; access_token=tok123; lang=en");
        assert_eq!(extract_access_token(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(extract_access_token(&HeaderMap::new()), None);
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(extract_access_token(&headers), None);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let headers = headers_with_cookie("garbage; access_token=tok123");
        assert_eq!(extract_access_token(&headers).as_deref(), Some("tok123"));
    }
}
