//! Rooms: named groups of connections that receive the same frames.

pub mod registry;
pub mod types;

pub use registry::RoomRegistry;
pub use types::Room;
