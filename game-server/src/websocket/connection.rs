use game_types::{ConnectionId, RoomId, ServerMessage};
use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};

/// What the outgoing loop of a socket is asked to do.
#[derive(Debug, Clone)]
pub enum Outbound {
    Message(ServerMessage),
    /// Send a close frame and stop.
    Close,
}

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub room_id: Option<RoomId>,
    pub sender: mpsc::UnboundedSender<Outbound>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        let connection = Self {
            id,
            room_id: None,
            sender,
        };

        (connection, receiver)
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(Outbound::Message(message))
            .map_err(|_| "Connection closed".to_string())
    }

    pub fn in_room(&self, room_id: &str) -> bool {
        self.room_id.as_deref() == Some(room_id)
    }
}

/// Live sockets on this instance and the room each one has joined.
pub struct ConnectionManager {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_connection(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<Outbound> {
        let (conn, receiver) = Connection::new(id);

        {
            let mut connections = self.connections.write().await;
            connections.insert(id, conn);
        }

        receiver
    }

    pub async fn remove_connection(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&id);
    }

    pub async fn get_connection(&self, id: ConnectionId) -> Option<Connection> {
        let connections = self.connections.read().await;
        connections.get(&id).cloned()
    }

    pub async fn join_room(&self, id: ConnectionId, room_id: &str) {
        let mut connections = self.connections.write().await;
        if let Some(connection) = connections.get_mut(&id) {
            connection.room_id = Some(room_id.to_string());
        }
    }

    /// Detach the connection if it is still joined to `room_id`.
    pub async fn leave_room(&self, id: ConnectionId, room_id: &str) {
        let mut connections = self.connections.write().await;
        if let Some(connection) = connections.get_mut(&id) {
            if connection.in_room(room_id) {
                connection.room_id = None;
            }
        }
    }

    pub async fn send_to_connection(&self, id: ConnectionId, message: ServerMessage) -> Result<(), String> {
        let connections = self.connections.read().await;
        if let Some(connection) = connections.get(&id) {
            connection.send_message(message)
        } else {
            Err("Connection not found".to_string())
        }
    }

    pub async fn send_to_room(&self, room_id: &str, message: ServerMessage) {
        let connections = self.connections.read().await;
        for connection in connections.values().filter(|c| c.in_room(room_id)) {
            let _ = connection.send_message(message.clone());
        }
    }

    /// Close every socket joined to `room_id` and detach them from it.
    pub async fn disconnect_room(&self, room_id: &str) -> usize {
        let mut connections = self.connections.write().await;
        let mut closed = 0;
        for connection in connections.values_mut().filter(|c| c.in_room(room_id)) {
            let _ = connection.sender.send(Outbound::Close);
            connection.room_id = None;
            closed += 1;
        }
        closed
    }

    pub async fn get_connections_in_room(&self, room_id: &str) -> Vec<ConnectionId> {
        let connections = self.connections.read().await;
        connections
            .values()
            .filter(|conn| conn.in_room(room_id))
            .map(|conn| conn.id)
            .collect()
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}
