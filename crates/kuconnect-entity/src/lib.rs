//! # kuconnect-entity
//!
//! Domain entity models for KU Connect. Every struct in this crate is a
//! database row or a value object built from rows. Row types derive
//! `sqlx::FromRow`; everything that reaches the HTTP layer serializes as
//! camelCase JSON.

pub mod chat;
pub mod interaction;
pub mod interest;
pub mod notification;
pub mod profile;
pub mod push;
pub mod settings;
pub mod user;
