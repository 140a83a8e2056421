//! Per-user privacy and notification settings.

pub mod model;
pub mod visibility;

pub use model::{Settings, SettingsPatch};
pub use visibility::Visibility;
