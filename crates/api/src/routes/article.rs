//! Article routes.
//!
//! Listing is anonymous-friendly (auto-login still runs so an access
//! record carries the user id when a remember-me cookie resolves);
//! creation requires an authenticated session.

use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::any;
use axum::Router;

use crate::dispatch::{dispatch, AuthPolicy};
use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/article/query", any(query))
        .route("/article/create", any(create))
}

async fn query(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state, request, AuthPolicy::Optional, handlers::article::query).await
}

async fn create(State(state): State<AppState>, request: Request) -> Response {
    dispatch(state, request, AuthPolicy::Required, handlers::article::create).await
}
