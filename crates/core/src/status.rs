//! Business status codes carried by the result envelope.
//!
//! These are *not* HTTP statuses: every dispatched request answers
//! `200 OK` at the transport level, and the envelope's `code` field
//! carries the business outcome. The numbering is normative for
//! interoperability with existing clients.

/// Known envelope status codes.
pub mod codes {
    /// The request was handled successfully.
    pub const OK: i32 = 200;
    /// The HTTP method is neither GET nor POST.
    pub const INVALID_METHOD: i32 = 300;
    /// A remember-me token failed verification (access log only;
    /// the envelope surfaces `NOT_LOGIN` instead).
    pub const INVALID_TOKEN: i32 = 310;
    /// The handler requires an authenticated session and none exists.
    pub const NOT_LOGIN: i32 = 410;
    /// A parameter was missing or malformed.
    pub const INVALID_PARAM: i32 = 401;
    /// An internal failure surfaced as a business error.
    pub const INTERNAL: i32 = 500;
}

/// Canonical human-readable messages paired with [`codes`].
pub mod messages {
    pub const OK: &str = "ok";
    pub const INVALID_METHOD: &str = "invalid method";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const NOT_LOGIN: &str = "not login";
    pub const INTERNAL: &str = "internal error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            codes::OK,
            codes::INVALID_METHOD,
            codes::INVALID_TOKEN,
            codes::INVALID_PARAM,
            codes::NOT_LOGIN,
            codes::INTERNAL,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
