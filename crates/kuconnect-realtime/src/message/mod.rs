//! Frames exchanged over the WebSocket.

pub mod types;

pub use types::{InboundMessage, OutboundMessage};
