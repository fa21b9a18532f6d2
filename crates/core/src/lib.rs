//! Domain crate for the inkpress blog backend.
//!
//! No HTTP or database machinery here: everything is usable from
//! the persistence layer, the API layer, and any future CLI tooling
//! without extra dependencies.

pub mod directory;
pub mod error;
pub mod status;
pub mod token;
pub mod types;
pub mod validation;
