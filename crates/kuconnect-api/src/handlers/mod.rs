//! Route handlers organized by domain.

pub mod chat;
pub mod health;
pub mod interaction;
pub mod interest;
pub mod notification;
pub mod profile;
pub mod settings;
pub mod ws;
