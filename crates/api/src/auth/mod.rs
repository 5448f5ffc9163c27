//! Access-token handling.
//!
//! Tokens are issued by the account service; this server only validates
//! them. [`jwt::generate_access_token`] exists for tooling and tests that
//! share the signing secret.

pub mod jwt;
