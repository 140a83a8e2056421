//! Top-level real-time engine that ties the subsystems together.

use std::sync::Arc;

use tracing::info;

use kuconnect_core::config::RealtimeConfig;
use kuconnect_service::chat::ChatService;
use kuconnect_service::live::LiveChannel;

use crate::connection::manager::ConnectionManager;
use crate::session::RealtimeSession;

/// Owns the connection manager. Built before the services so they can be
/// handed its live channel, then completed with [`RealtimeEngine::session`].
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
}

impl RealtimeEngine {
    /// Creates a new real-time engine.
    pub fn new(config: RealtimeConfig) -> Self {
        info!(
            max_connections_per_user = config.max_connections_per_user,
            buffer = config.channel_buffer_size,
            "Real-time engine initialized"
        );
        Self {
            connections: Arc::new(ConnectionManager::new(config)),
        }
    }

    /// The live delivery channel backed by this engine.
    pub fn live_channel(&self) -> Arc<dyn LiveChannel> {
        self.connections.clone()
    }

    /// Inbound frame handler bound to the chat service.
    pub fn session(&self, chats: ChatService) -> RealtimeSession {
        RealtimeSession::new(self.connections.clone(), chats)
    }

    /// Close every connection.
    pub fn shutdown(&self) {
        info!(
            connections = self.connections.connection_count(),
            users = self.connections.user_count(),
            "Shutting down real-time engine"
        );
        self.connections.close_all();
    }
}
