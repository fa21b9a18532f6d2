//! Interactive login and logout.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use inkpress_core::status::{codes, messages};
use inkpress_core::{token, validation};

use crate::cookies::{self, names};
use crate::dispatch::RequestContext;
use crate::envelope::Envelope;
use crate::password;

// Handler-local outcome codes, disjoint from the pipeline codes.
const INVALID_CREDENTIALS: i32 = 402;
const ACCOUNT_INACTIVE: i32 = 403;

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    account: String,
    password: String,
    #[serde(default)]
    remember_me: bool,
}

/// `POST /user/login` -- interactive credential check.
///
/// On success the session is promoted in place and, when requested,
/// a remember-me cookie triple is issued so later sessions can
/// auto-login.
pub async fn login(ctx: RequestContext, mut envelope: Envelope) -> Envelope {
    // 1. Parse and validate the request.
    let input: LoginRequest = match serde_json::from_slice(&ctx.body) {
        Ok(input) => input,
        Err(_) => {
            envelope.set_result(codes::INVALID_PARAM, "invalid param");
            return envelope;
        }
    };
    if !validation::is_valid_account(&input.account) || input.password.is_empty() {
        envelope.set_result(codes::INVALID_PARAM, "invalid param");
        return envelope;
    }

    // 2. Look up the account. A missing account and a wrong password
    //    produce the same outcome.
    let user = match ctx.state.directory.find_by_account(&input.account).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            envelope.set_result(INVALID_CREDENTIALS, "invalid account or password");
            return envelope;
        }
        Err(err) => {
            tracing::error!(account = %input.account, error = %err, "login lookup failed");
            envelope.set_result(codes::INTERNAL, messages::INTERNAL);
            return envelope;
        }
    };

    // 3. Only active accounts may log in.
    if !user.is_active() {
        envelope.set_result(ACCOUNT_INACTIVE, "account not active");
        return envelope;
    }

    // 4. Verify the password.
    match password::verify_password(&input.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            envelope.set_result(INVALID_CREDENTIALS, "invalid account or password");
            return envelope;
        }
        Err(err) => {
            tracing::error!(user_id = user.id, error = %err, "password verification failed");
            envelope.set_result(codes::INTERNAL, messages::INTERNAL);
            return envelope;
        }
    }

    // 5. Promote the session. Marking the attempt flag too means a
    //    later auto-login pass on this record is a no-op.
    {
        let mut record = ctx.session.record.lock().await;
        record.user_id = user.id;
        record.auth_attempted = true;
    }

    // 6. Best-effort login timestamp.
    if let Err(err) = ctx.state.directory.record_login(user.id, Utc::now()).await {
        tracing::warn!(user_id = user.id, error = %err, "failed to record login time");
    }

    // 7. Issue the remember-me cookie triple when asked for.
    if input.remember_me {
        let validity_secs = ctx.state.config.token_validity_days * SECS_PER_DAY;
        let expires_at = Utc::now().timestamp() + validity_secs;
        let token = token::derive(&ctx.state.config.session_secret, &user, expires_at);

        ctx.cookies_out
            .add(cookies::build(names::USER_ID, &user.id.to_string(), Some(validity_secs)));
        ctx.cookies_out
            .add(cookies::build(names::TOKEN, &token, Some(validity_secs)));
        ctx.cookies_out.add(cookies::build(
            names::TOKEN_TIME,
            &expires_at.to_string(),
            Some(validity_secs),
        ));
    }

    envelope.set_data(json!({
        "user": {
            "id": user.id,
            "account": user.account,
            "email": user.email,
        }
    }));
    envelope.set_result(codes::OK, messages::OK);
    envelope
}

/// `POST /user/logout` -- drop the caller's authenticated session.
///
/// The old record is abandoned rather than cleared (a session's
/// `user_id`, once set, stays set); the caller gets a fresh
/// unauthenticated session and the remember-me cookies are expired so
/// the next request cannot auto-login.
pub async fn logout(ctx: RequestContext, mut envelope: Envelope) -> Envelope {
    ctx.cookies_out.add(cookies::expire(names::USER_ID));
    ctx.cookies_out.add(cookies::expire(names::TOKEN));
    ctx.cookies_out.add(cookies::expire(names::TOKEN_TIME));

    let fresh = ctx.state.sessions.create().await;
    ctx.cookies_out
        .add(cookies::build(names::SESSION, &fresh.id, None));

    envelope.set_result(codes::OK, messages::OK);
    envelope
}
