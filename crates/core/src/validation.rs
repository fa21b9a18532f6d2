//! Account name validation.

use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of an account name.
const MAX_ACCOUNT_LEN: usize = 16;

fn account_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][0-9A-Za-z\-_\.]{4,15}$").expect("account regex is valid")
    })
}

/// Whether `s` is a well-formed account name.
///
/// Rules: starts with a letter, 5 to [`MAX_ACCOUNT_LEN`] characters,
/// alphanumeric plus `-`, `_`, `.`.
pub fn is_valid_account(s: &str) -> bool {
    s.len() <= MAX_ACCOUNT_LEN && account_regex().is_match(s)
}
