use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};
use tracing::debug;

use application::ports::out_::{Notification, PlayerNotifier};
use domain::PlayerId;

type OutboundSender = mpsc::UnboundedSender<String>;

/// Hands rendered text to each connection's writer task. Dropping a
/// player's sender is what closes the connection.
pub struct TcpNotifier {
    connections: RwLock<HashMap<PlayerId, OutboundSender>>,
}

impl TcpNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register_player(
        &self,
        player_id: PlayerId,
        sender: OutboundSender,
    ) {
        self.connections.write().await.insert(player_id, sender);
    }

    pub async fn unregister_player(
        &self,
        player_id: PlayerId,
    ) -> bool {
        self.connections.write().await.remove(&player_id).is_some()
    }

    async fn send_to_player(
        &self,
        player_id: PlayerId,
        message: String,
    ) {
        debug!(player_id = ?player_id, message = %message.trim_end(), "-> Sending");
        let connections = self.connections.read().await;
        let Some(sender) = connections.get(&player_id) else {
            debug!(player_id = ?player_id, "No connection for player, message dropped");
            return;
        };
        if sender.send(message).is_err() {
            debug!(player_id = ?player_id, "Connection already closed, message dropped");
        }
    }
}

impl Default for TcpNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerNotifier for TcpNotifier {
    async fn notify_player(
        &self,
        player_id: PlayerId,
        notification: Notification,
    ) {
        self.send_to_player(player_id, notification.to_string()).await;
    }

    async fn disconnect_player(
        &self,
        player_id: PlayerId,
    ) {
        if !self.unregister_player(player_id).await {
            debug!(player_id = ?player_id, "No connection to close");
        }
    }
}
