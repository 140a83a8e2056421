//! Notification persistence, delivery and the event worker.

pub mod dispatcher;
pub mod service;
pub mod worker;

pub use dispatcher::NotificationDispatcher;
pub use service::NotificationService;
pub use worker::EventWorker;
