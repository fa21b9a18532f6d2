//! Remember-me token codec.
//!
//! A token is an HMAC-SHA256 digest over the user's identity material
//! and the token's expiry timestamp, keyed with a per-install secret.
//! The password hash participates in the derivation as a user-specific
//! secret component, so changing a password invalidates every
//! outstanding remember-me token for that user.
//!
//! Tokens are opaque to clients: they are only ever compared for
//! equality, never decoded. This derivation is the sole cryptographic
//! trust boundary of the auto-login path.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::directory::UserIdentity;

type HmacSha256 = Hmac<Sha256>;

/// Derive the remember-me token for `identity` expiring at `expires_at`
/// (unix seconds).
///
/// Pure and deterministic: identical inputs always produce the
/// identical 64-character lowercase hex digest.
pub fn derive(secret: &str, identity: &UserIdentity, expires_at: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(identity.id.to_string().as_bytes());
    mac.update(b"|");
    mac.update(identity.account.as_bytes());
    mac.update(b"|");
    mac.update(identity.password_hash.as_bytes());
    mac.update(b"|");
    mac.update(expires_at.to_string().as_bytes());
    let digest = mac.finalize().into_bytes();
    format!("{digest:x}")
}

/// Verify a client-supplied token against a fresh derivation.
///
/// The comparison is constant-time over the digest bytes so a
/// byte-by-byte timing probe cannot recover a valid token.
pub fn verify(secret: &str, identity: &UserIdentity, expires_at: i64, token: &str) -> bool {
    constant_time_eq(derive(secret, identity, expires_at).as_bytes(), token.as_bytes())
}

/// Constant-time byte-slice equality.
///
/// Length mismatch returns early; only the token length leaks, which
/// is public anyway (all derived tokens are 64 hex characters).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
