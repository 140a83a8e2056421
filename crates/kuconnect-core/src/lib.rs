//! # kuconnect-core
//!
//! Core crate for KU Connect. Contains configuration schemas, typed
//! identifiers, pagination, domain events with the in-process event bus,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other KU Connect crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
