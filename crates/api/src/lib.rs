//! inkpress API server library.
//!
//! Exposes the request-handling pipeline (config, state, session store,
//! auto-login, dispatcher, envelope, routes) so integration tests and
//! the binary entrypoint can both access them.

pub mod access_log;
pub mod autologin;
pub mod background;
pub mod config;
pub mod cookies;
pub mod dispatch;
pub mod envelope;
pub mod handlers;
pub mod password;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
