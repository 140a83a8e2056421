//! Visibility and notification preferences.

pub mod service;

pub use service::SettingsService;
