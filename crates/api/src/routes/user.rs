//! User routes: login and logout.
//!
//! Both are bootstrap paths: they must stay reachable for sessions
//! that cannot authenticate, so they run with [`AuthPolicy::Public`]
//! and never trigger an auto-login attempt. Method validation still
//! applies inside the dispatcher, hence `any` here.

use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::any;
use axum::Router;

use crate::dispatch::{dispatch, AuthPolicy};
use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/login", any(login))
        .route("/user/logout", any(logout))
}

async fn login(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state, request, AuthPolicy::Public, handlers::user::login).await
}

async fn logout(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state, request, AuthPolicy::Public, handlers::user::logout).await
}
