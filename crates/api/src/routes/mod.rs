//! Route registration.
//!
//! Each business route is a thin axum handler that hands the raw
//! request to the dispatcher with its auth policy and business
//! handler; only `/health` bypasses the pipeline.

pub mod article;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// All business routes (everything that goes through the dispatcher).
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(user::router()).merge(article::router())
}
