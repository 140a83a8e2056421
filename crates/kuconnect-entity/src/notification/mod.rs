//! Notification domain entities.

pub mod data;
pub mod kind;
pub mod model;

pub use data::NotificationData;
pub use kind::NotificationKind;
pub use model::{NewNotification, Notification};
