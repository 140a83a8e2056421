//! Chat domain entities.

pub mod model;
pub mod summary;

pub use model::{Chat, Message};
pub use summary::{ChatDetail, ChatPeer, ChatSummary, LastMessage};
