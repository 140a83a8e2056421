//! # kuconnect-realtime
//!
//! Real-time WebSocket engine for KU Connect. Provides:
//!
//! - A pool of authenticated connections, several per user
//! - Rooms: every connection sits in its `user:{id}` room and may join
//!   the chat rooms of chats its user belongs to
//! - The JSON frame protocol spoken over the socket
//! - The live delivery channel used by the notification dispatcher and
//!   the chat service

pub mod connection;
pub mod live;
pub mod message;
pub mod room;
pub mod server;
pub mod session;

pub use connection::manager::ConnectionManager;
pub use server::RealtimeEngine;
pub use session::RealtimeSession;
