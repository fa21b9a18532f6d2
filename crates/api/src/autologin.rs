//! Remember-me auto-login resolver.
//!
//! Promotes an unauthenticated session to authenticated using the
//! long-lived cookie triple (`S_UID`, `S_TOKEN`, `S_TOKEN_TIME`),
//! at most once per session record. Every terminal outcome -- success
//! or any failure -- marks the record so no further attempt happens
//! for the session's lifetime; a client retries only by obtaining a
//! fresh session cookie.
//!
//! Failure is always silent from the client's perspective (the request
//! simply proceeds unauthenticated); only the access log distinguishes
//! outcomes, with status 310 `invalid_token` flagging a token that was
//! present and well-formed but failed verification.

use std::collections::HashMap;

use inkpress_core::status::{codes, messages};
use inkpress_core::token;
use inkpress_core::types::DbId;

use crate::access_log;
use crate::cookies::{self, names};
use crate::session::SessionHandle;
use crate::state::AppState;

/// Request facts the resolver needs for its distinct log events.
pub struct RequestInfo<'a> {
    pub ip: &'a str,
    pub path: &'a str,
    pub query: Option<&'a str>,
}

/// Resolve the session's authenticated user id, attempting auto-login
/// if this record has never tried before.
///
/// Returns the resolved user id (0 if unauthenticated). Idempotent per
/// record: after the first terminal outcome this performs no directory
/// lookups and no token computations.
pub async fn resolve(
    state: &AppState,
    session: &SessionHandle,
    request_cookies: &HashMap<String, String>,
    info: &RequestInfo<'_>,
) -> DbId {
    // The record lock is held across the whole attempt so two requests
    // racing on the same session id cannot both run the credential
    // check: at-most-once promotion per session.
    let mut record = session.record.lock().await;

    // Already authenticated: nothing to do.
    if record.user_id != 0 {
        return record.user_id;
    }
    // A prior attempt (success or failure) already ran.
    if record.auth_attempted {
        return 0;
    }

    let outcome = attempt(state, &session.id, request_cookies, info).await;
    record.auth_attempted = true;
    if let Some(user_id) = outcome {
        record.user_id = user_id;
    }
    record.user_id
}

/// Run one credential check. `None` means "proceed unauthenticated".
async fn attempt(
    state: &AppState,
    session_id: &str,
    request_cookies: &HashMap<String, String>,
    info: &RequestInfo<'_>,
) -> Option<DbId> {
    // 1. The full cookie triple must be present and well-formed;
    //    anything missing is a silent short-circuit, not an error.
    let user_id = cookies::get_i64(request_cookies, names::USER_ID).filter(|id| *id != 0)?;
    let token = request_cookies.get(names::TOKEN).filter(|t| !t.is_empty())?;
    let token_time = cookies::get_i64(request_cookies, names::TOKEN_TIME)?;

    // 2. The credential must expire strictly in the future.
    if token_time <= chrono::Utc::now().timestamp() {
        return None;
    }

    // 3. Look up the candidate identity. A directory failure fails
    //    closed: the request proceeds unauthenticated.
    let identity = match state.directory.find_by_id(user_id).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, user_id, "Directory lookup failed during auto-login");
            return None;
        }
    };

    // 4. Only active accounts may auto-login.
    if !identity.is_active() {
        return None;
    }

    // 5. Constant-time token verification. A mismatch is logged
    //    distinctly: it means tampering, or credential reuse after a
    //    secret rotation.
    if !token::verify(&state.config.session_secret, &identity, token_time, token) {
        access_log::log_auto_login(
            info.ip,
            session_id,
            user_id,
            codes::INVALID_TOKEN,
            messages::INVALID_TOKEN,
            info.path,
            info.query,
        );
        return None;
    }

    access_log::log_auto_login(
        info.ip,
        session_id,
        user_id,
        codes::OK,
        messages::OK,
        info.path,
        info.query,
    );

    // 6. Record the login. Failure here is non-fatal to the
    //    authentication outcome but must reach the log.
    if let Err(e) = state
        .directory
        .record_login(identity.id, chrono::Utc::now())
        .await
    {
        tracing::warn!(error = %e, user_id, "Failed to record auto-login timestamp");
    }

    Some(identity.id)
}
