//! # kuconnect-auth
//!
//! Bearer token handling for KU Connect. Accounts and sign-in belong to
//! an external auth provider; this crate only verifies the HS256 tokens it
//! issues and, for tooling and tests, mints compatible ones.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
