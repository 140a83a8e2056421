//! Connection manager: connection lifecycle, rooms and frame routing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use kuconnect_core::config::RealtimeConfig;
use kuconnect_core::types::UserId;

use crate::message::types::OutboundMessage;
use crate::room::{Room, RoomRegistry};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: ConnectionPool,
    /// Room membership.
    rooms: RoomRegistry,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: ConnectionPool::new(),
            rooms: RoomRegistry::new(),
            config,
        }
    }

    /// Registers a new authenticated connection and joins it to its user room.
    ///
    /// Returns the connection handle and the receiver for outbound frames.
    pub fn register(&self, user_id: UserId) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));

        let existing = self.pool.get_user_connections(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, oldest will be replaced"
            );
            if let Some(oldest) = existing.first() {
                self.unregister(&oldest.id);
            }
        }

        self.pool.add(handle.clone());
        self.rooms.join(Room::User(user_id), handle.id);

        info!(conn_id = %handle.id, user_id = %user_id, "WebSocket connection registered");
        (handle, rx)
    }

    /// Unregisters a connection and removes it from every room.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            self.rooms.leave_all(*conn_id);
            info!(conn_id = %conn_id, user_id = %handle.user_id, "WebSocket connection unregistered");
        }
    }

    /// Adds a connection to a room.
    pub fn join(&self, conn_id: ConnectionId, room: Room) {
        if self.rooms.join(room, conn_id) {
            debug!(conn_id = %conn_id, room = %room, "Joined room");
        }
    }

    /// Removes a connection from a room.
    pub fn leave(&self, conn_id: ConnectionId, room: Room) {
        if self.rooms.leave(room, conn_id) {
            debug!(conn_id = %conn_id, room = %room, "Left room");
        }
    }

    /// Sends a frame to one connection.
    pub fn send_to_connection(&self, conn_id: &ConnectionId, message: &OutboundMessage) -> bool {
        let Some(frame) = serialize(message) else {
            return false;
        };
        self.pool.get(conn_id).is_some_and(|handle| handle.send(frame))
    }

    /// Sends a frame to every connection in a room. Returns how many accepted it.
    pub fn send_to_room(&self, room: &Room, message: &OutboundMessage) -> usize {
        let Some(frame) = serialize(message) else {
            return 0;
        };
        self.rooms
            .members(room)
            .iter()
            .filter_map(|conn_id| self.pool.get(conn_id))
            .filter(|handle| handle.send(frame.clone()))
            .count()
    }

    /// Sends a frame to every connection of a user.
    pub fn send_to_user(&self, user_id: UserId, message: &OutboundMessage) -> usize {
        self.send_to_room(&Room::User(user_id), message)
    }

    /// Closes all connections.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            self.unregister(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Whether a connection sits in a room.
    pub fn in_room(&self, conn_id: ConnectionId, room: &Room) -> bool {
        self.rooms.is_member(room, conn_id)
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Checks if a user is currently connected.
    pub fn is_user_connected(&self, user_id: &UserId) -> bool {
        !self.pool.get_user_connections(user_id).is_empty()
    }

    /// Realtime configuration in effect.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }
}

fn serialize(message: &OutboundMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(frame) => Some(frame),
        Err(e) => {
            error!(error = %e, "Failed to serialize outbound message");
            None
        }
    }
}
