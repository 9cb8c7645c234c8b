use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::utils::{Error, Result};

pub type ConnectionId = String;

/// Lifecycle of a connection as observed by the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Registered but not yet interested in any faculty.
    Connected,
    /// Receives events for its current topic.
    Subscribed,
    /// The transport side has gone away. Terminal.
    Closed,
}

/// A live duplex channel to one client.
///
/// Outbound messages are pushed as serialized JSON text into `sender`; the
/// owning transport drains the matching receiver onto the socket.
#[derive(Debug)]
pub struct Connection {
    /// Unique identifier for the connection (a UUID v4 string).
    pub id: ConnectionId,

    /// Channel to send serialized messages to the client.
    pub sender: UnboundedSender<String>,

    /// Faculty this connection listens to, if it has subscribed.
    pub topic: Option<String>,
}

impl Connection {
    pub fn new(sender: UnboundedSender<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            topic: None,
        }
    }

    /// True while the transport still drains this connection's channel.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    pub fn state(&self) -> ConnectionState {
        match (self.is_open(), &self.topic) {
            (false, _) => ConnectionState::Closed,
            (true, Some(_)) => ConnectionState::Subscribed,
            (true, None) => ConnectionState::Connected,
        }
    }

    pub fn is_subscribed_to(&self, topic: &str) -> bool {
        self.topic.as_deref() == Some(topic)
    }

    pub fn send(&self, text: &str) -> Result<()> {
        self.sender
            .send(text.to_owned())
            .map_err(|_| Error::ConnectionClosed(self.id.clone()))
    }
}
