//! Per-request access logging.
//!
//! One tab-separated line per request on the dedicated `access` tracing
//! target, so operators can route the audit stream to its own sink via
//! `EnvFilter` (e.g. `access=info`). Field order is stable:
//! client ip, session id, user id, status code, status message,
//! request path, query string.

use axum::http::request::Parts;

use inkpress_core::types::DbId;

/// Emit the post-request access record.
pub fn log_request(
    ip: &str,
    session_id: &str,
    user_id: DbId,
    code: i32,
    msg: &str,
    path: &str,
    query: Option<&str>,
) {
    tracing::info!(
        target: "access",
        "{ip}\t{session_id}\t{user_id}\t{code}\t{msg}\t{path}\t{}",
        query.filter(|q| !q.is_empty()).unwrap_or("-"),
    );
}

/// Emit a distinct record for an auto-login outcome.
///
/// Auto-login events carry an extra `auto_login` column so credential
/// tampering (status 310) is separable from ordinary request traffic.
pub fn log_auto_login(
    ip: &str,
    session_id: &str,
    user_id: DbId,
    code: i32,
    msg: &str,
    path: &str,
    query: Option<&str>,
) {
    tracing::info!(
        target: "access",
        "{ip}\t{session_id}\t{user_id}\t{code}\t{msg}\tauto_login\t{path}\t{}",
        query.filter(|q| !q.is_empty()).unwrap_or("-"),
    );
}

/// Resolve the client address for logging.
///
/// Prefers the `X-Real-IP` header set by a fronting proxy; falls back
/// to the transport peer address with the port stripped; `-` when
/// neither is available (e.g. in-process test requests).
pub fn client_ip(parts: &Parts) -> String {
    if let Some(ip) = parts.headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if !ip.is_empty() {
            return ip.to_string();
        }
    }
    parts
        .extensions
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "-".to_string())
}
