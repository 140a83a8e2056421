//! Room registry: which connections sit in which rooms.

use std::collections::HashSet;

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::types::Room;

/// Registry of all occupied rooms, with a reverse index per connection.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// Room → member connections.
    rooms: DashMap<Room, HashSet<ConnectionId>>,
    /// Connection → rooms it joined.
    by_connection: DashMap<ConnectionId, HashSet<Room>>,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a room. Returns `false` if it was already there.
    pub fn join(&self, room: Room, conn_id: ConnectionId) -> bool {
        self.by_connection.entry(conn_id).or_default().insert(room);
        self.rooms.entry(room).or_default().insert(conn_id)
    }

    /// Removes a connection from a room.
    pub fn leave(&self, room: Room, conn_id: ConnectionId) -> bool {
        if let Some(mut rooms) = self.by_connection.get_mut(&conn_id) {
            rooms.remove(&room);
        }
        self.remove_member(room, conn_id)
    }

    /// Removes a connection from every room.
    pub fn leave_all(&self, conn_id: ConnectionId) {
        let rooms = self
            .by_connection
            .remove(&conn_id)
            .map(|(_, rooms)| rooms)
            .unwrap_or_default();
        for room in rooms {
            self.remove_member(room, conn_id);
        }
    }

    /// Connections in a room.
    pub fn members(&self, room: &Room) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a connection is in a room.
    pub fn is_member(&self, room: &Room, conn_id: ConnectionId) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.contains(&conn_id))
    }

    /// Returns total number of occupied rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn remove_member(&self, room: Room, conn_id: ConnectionId) -> bool {
        let Some(mut members) = self.rooms.get_mut(&room) else {
            return false;
        };
        let removed = members.remove(&conn_id);
        if members.is_empty() {
            drop(members);
            self.rooms.remove_if(&room, |_, members| members.is_empty());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuconnect_core::types::{ChatId, UserId};
    use uuid::Uuid;

    #[test]
    fn test_empty_rooms_are_dropped() {
        let registry = RoomRegistry::new();
        let conn = Uuid::new_v4();
        let room = Room::Chat(ChatId::new());

        assert!(registry.join(room, conn));
        assert!(!registry.join(room, conn));
        assert!(registry.is_member(&room, conn));
        assert!(registry.leave(room, conn));
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_leave_all_clears_every_room() {
        let registry = RoomRegistry::new();
        let (conn, other) = (Uuid::new_v4(), Uuid::new_v4());
        let user_room = Room::User(UserId::new());
        let chat_room = Room::Chat(ChatId::new());

        registry.join(user_room, conn);
        registry.join(chat_room, conn);
        registry.join(chat_room, other);
        registry.leave_all(conn);

        assert!(registry.members(&user_room).is_empty());
        assert_eq!(registry.members(&chat_room), vec![other]);
        assert_eq!(registry.room_count(), 1);
    }
}
