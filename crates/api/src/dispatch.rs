//! Policy-driven request dispatcher.
//!
//! Every business route funnels through [`dispatch`], which runs the
//! fixed pipeline around the route's handler:
//!
//! 1. **Pre-check** -- session resolution (get-or-create from the
//!    `SSESSIONID` cookie), auto-login per the route's [`AuthPolicy`],
//!    then HTTP method validation (GET/POST only).
//! 2. **Handle** -- the business handler runs only when the pre-check
//!    passed; it receives the request context and the envelope and
//!    returns the (possibly mutated) envelope.
//! 3. **Post** -- one access-log record, unconditionally.
//! 4. **Respond** -- the envelope serialized as the body, CORS headers,
//!    and the `used` elapsed-time header. HTTP status is always 200;
//!    the business outcome lives in the envelope.
//!
//! The central contract: no business logic runs on a failed pre-check.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use axum::response::Response;

use inkpress_core::status::{codes, messages};
use inkpress_core::types::DbId;

use crate::access_log;
use crate::autologin::{self, RequestInfo};
use crate::cookies::{self, names};
use crate::envelope::Envelope;
use crate::session::SessionHandle;
use crate::state::AppState;

/// Maximum accepted request body size.
const BODY_LIMIT: usize = 1024 * 1024;

/// Authentication requirement of a route.
///
/// Composition replaces the classic "base servlet / logged-in servlet"
/// override hierarchy: a route declares its policy and the dispatcher
/// enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Bootstrap paths (login, logout): the session is still resolved,
    /// but no auto-login attempt is made -- these must stay reachable
    /// without an authentication check.
    Public,
    /// Auto-login runs; the handler sees `user_id == 0` when it failed.
    Optional,
    /// Auto-login runs; an unauthenticated session fails pre-check
    /// with 410 "not login".
    Required,
}

/// Set-Cookie values accumulated during a request.
///
/// Shared between the dispatcher and the handler (login/logout mutate
/// cookies), applied to the response in order of insertion.
#[derive(Clone, Default)]
pub struct ResponseCookies(Arc<Mutex<Vec<String>>>);

impl ResponseCookies {
    pub fn add(&self, set_cookie: String) {
        self.0.lock().expect("cookie list lock poisoned").push(set_cookie);
    }

    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().expect("cookie list lock poisoned"))
    }
}

/// Everything a business handler may need from the request.
pub struct RequestContext {
    pub state: AppState,
    /// The resolved (possibly freshly created) session.
    pub session: SessionHandle,
    /// Authenticated user id at pre-check time; 0 if none.
    pub user_id: DbId,
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// Raw request body; handlers parse JSON themselves.
    pub body: Bytes,
    /// Cookies parsed from the request.
    pub request_cookies: HashMap<String, String>,
    /// Set-Cookie values to attach to the response.
    pub cookies_out: ResponseCookies,
}

/// Run the full pipeline around `handler`.
pub async fn dispatch<H, Fut>(
    state: AppState,
    request: Request,
    policy: AuthPolicy,
    handler: H,
) -> Response
where
    H: FnOnce(RequestContext, Envelope) -> Fut,
    Fut: Future<Output = Envelope>,
{
    let started = Instant::now();

    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, BODY_LIMIT)
        .await
        .unwrap_or_default();

    let ip = access_log::client_ip(&parts);
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().map(str::to_string);
    let request_cookies = cookies::parse(&parts.headers);
    let cookies_out = ResponseCookies::default();

    let mut envelope = Envelope::new();

    // -- Pre-check: session resolution --
    let session = resolve_session(&state, &request_cookies, &cookies_out).await;

    let mut pre_ok = true;
    let user_id = match policy {
        AuthPolicy::Public => session.record.lock().await.user_id,
        AuthPolicy::Optional | AuthPolicy::Required => {
            let info = RequestInfo {
                ip: &ip,
                path: &path,
                query: query.as_deref(),
            };
            let uid = autologin::resolve(&state, &session, &request_cookies, &info).await;
            if policy == AuthPolicy::Required && uid == 0 {
                envelope.set_result(codes::NOT_LOGIN, messages::NOT_LOGIN);
                pre_ok = false;
            }
            uid
        }
    };

    // -- Pre-check: method validation --
    if pre_ok && parts.method != Method::GET && parts.method != Method::POST {
        envelope.set_result(codes::INVALID_METHOD, messages::INVALID_METHOD);
        pre_ok = false;
    }

    // -- Handle: business logic only on a passed pre-check --
    if pre_ok {
        let ctx = RequestContext {
            state: state.clone(),
            session: session.clone(),
            user_id,
            method: parts.method.clone(),
            path: path.clone(),
            query: query.clone(),
            headers: parts.headers.clone(),
            body,
            request_cookies,
            cookies_out: cookies_out.clone(),
        };
        envelope = handler(ctx, envelope).await;
    }

    // -- Post: one access record per request, both branches --
    let resolved_uid = session.record.lock().await.user_id;
    access_log::log_request(
        &ip,
        &session.id,
        resolved_uid,
        envelope.code(),
        envelope.msg(),
        &path,
        query.as_deref(),
    );

    // -- Respond --
    finalize(envelope, started, cookies_out.drain())
}

/// Get the session named by the request cookie, or create a fresh one
/// and queue its Set-Cookie.
async fn resolve_session(
    state: &AppState,
    request_cookies: &HashMap<String, String>,
    cookies_out: &ResponseCookies,
) -> SessionHandle {
    if let Some(sid) = request_cookies.get(names::SESSION) {
        if let Some(session) = state.sessions.get(sid).await {
            return session;
        }
    }
    let session = state.sessions.create().await;
    cookies_out.add(cookies::build(names::SESSION, &session.id, None));
    session
}

/// Serialize the envelope and attach the response headers.
fn finalize(envelope: Envelope, started: Instant, set_cookies: Vec<String>) -> Response {
    let used_ms = started.elapsed().as_secs_f64() * 1000.0;
    let mut response = Response::new(axum::body::Body::from(envelope.to_json_string()));

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    if let Ok(used) = HeaderValue::from_str(&format!("{used_ms:.3}ms")) {
        headers.insert("used", used);
    }
    for cookie in set_cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.append(header::SET_COOKIE, value);
        }
    }
    response
}
