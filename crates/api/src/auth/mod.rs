//! Authentication primitives.
//!
//! Tokens are issued by the identity service; this crate only validates them.
//!
//! - [`jwt`] -- JWT access-token validation (and generation, for tooling and tests).

pub mod jwt;
