//! Web-push subscription entities.

pub mod model;

pub use model::{NewPushSubscription, PushKeys, PushSubscription};
