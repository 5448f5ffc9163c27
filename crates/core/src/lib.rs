//! Shared domain types, errors, and pure validation for the Scribe backend.
//!
//! Nothing in this crate touches the database or the network; the DB and
//! API layers call into it before persisting user input.

pub mod article;
pub mod comment;
pub mod error;
pub mod paging;
pub mod types;
