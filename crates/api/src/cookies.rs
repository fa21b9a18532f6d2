//! Cookie names, parsing, and Set-Cookie construction.
//!
//! The cookie names are normative for interoperability with existing
//! clients; do not rename them.

use std::collections::HashMap;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie names consumed and produced by the pipeline.
pub mod names {
    /// Server-side session key.
    pub const SESSION: &str = "SSESSIONID";
    /// Remember-me: candidate user id.
    pub const USER_ID: &str = "S_UID";
    /// Remember-me: credential token.
    pub const TOKEN: &str = "S_TOKEN";
    /// Remember-me: token expiry as unix seconds.
    pub const TOKEN_TIME: &str = "S_TOKEN_TIME";
}

/// Parse every `Cookie` header into a name → value map.
///
/// Later occurrences of a repeated name win; malformed fragments are
/// skipped.
pub fn parse(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for fragment in raw.split(';') {
            let fragment = fragment.trim();
            if let Some((name, value)) = fragment.split_once('=') {
                if !name.is_empty() {
                    out.insert(name.to_string(), value.to_string());
                }
            }
        }
    }
    out
}

/// Typed convenience accessor over a parsed cookie map.
pub fn get_i64(cookies: &HashMap<String, String>, name: &str) -> Option<i64> {
    cookies.get(name)?.parse().ok()
}

/// Build a `Set-Cookie` value scoped to the whole site.
///
/// `max_age = None` makes a session cookie (expires with the browser).
pub fn build(name: &str, value: &str, max_age: Option<i64>) -> String {
    match max_age {
        Some(secs) => format!("{name}={value}; Path=/; Max-Age={secs}; SameSite=Lax; HttpOnly"),
        None => format!("{name}={value}; Path=/; SameSite=Lax; HttpOnly"),
    }
}

/// Build a `Set-Cookie` value that deletes the named cookie.
pub fn expire(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; SameSite=Lax; HttpOnly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(raw: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.append(COOKIE, HeaderValue::from_str(raw).unwrap());
        h
    }

    #[test]
    fn parses_multiple_cookies() {
        let cookies = parse(&headers_with("SSESSIONID=abc; S_UID=42; S_TOKEN=deadbeef"));
        assert_eq!(cookies.get(names::SESSION).map(String::as_str), Some("abc"));
        assert_eq!(get_i64(&cookies, names::USER_ID), Some(42));
        assert_eq!(cookies.get(names::TOKEN).map(String::as_str), Some("deadbeef"));
    }

    #[test]
    fn skips_malformed_fragments() {
        let cookies = parse(&headers_with("junk; =novalue; a=1"));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn parses_across_repeated_headers() {
        let mut h = headers_with("a=1");
        h.append(COOKIE, HeaderValue::from_static("b=2"));
        let cookies = parse(&h);
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn non_numeric_uid_is_none() {
        let cookies = parse(&headers_with("S_UID=forty-two"));
        assert_eq!(get_i64(&cookies, names::USER_ID), None);
    }

    #[test]
    fn build_and_expire_shapes() {
        let set = build(names::SESSION, "abc", None);
        assert!(set.starts_with("SSESSIONID=abc; Path=/"));
        assert!(!set.contains("Max-Age"));

        let persistent = build(names::TOKEN, "t", Some(3600));
        assert!(persistent.contains("Max-Age=3600"));

        let gone = expire(names::TOKEN);
        assert!(gone.contains("Max-Age=0"));
    }
}
