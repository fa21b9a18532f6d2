//! Business handlers invoked by the dispatcher after a passed
//! pre-check. Each handler takes the request context and the envelope
//! and returns the envelope with the business outcome filled in.

pub mod article;
pub mod user;
