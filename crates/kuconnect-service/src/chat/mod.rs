//! One-to-one chats between connected users.

pub mod service;

pub use service::ChatService;
