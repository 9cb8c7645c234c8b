//! Session registry
//!
//! Maps connection ids to `Connection`s. Backed by a sharded `DashMap`, so
//! insert, remove and full traversal are safe from any number of connection
//! tasks without an external lock.
//!
//! Do not call back into the registry from inside a `for_each_open` closure;
//! the traversal holds shard read locks.

use dashmap::DashMap;

use crate::connection::{Connection, ConnectionId};
use crate::utils::{Error, Result};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    connections: DashMap<ConnectionId, Connection>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn insert(&self, connection: Connection) {
        self.connections.insert(connection.id.clone(), connection);
    }

    /// Removes a connection. Returns `None` if it was already gone.
    pub fn remove(&self, id: &str) -> Option<Connection> {
        self.connections.remove(id).map(|(_, connection)| connection)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn clear(&self) {
        self.connections.clear();
    }

    /// Overwrites the topic of an open connection.
    ///
    /// Returns `false` when the connection is unknown or already closed.
    pub fn set_topic(&self, id: &str, topic: String) -> bool {
        match self.connections.get_mut(id) {
            Some(mut connection) if connection.is_open() => {
                connection.topic = Some(topic);
                true
            }
            _ => false,
        }
    }

    pub fn topic_of(&self, id: &str) -> Option<String> {
        self.connections
            .get(id)
            .and_then(|connection| connection.topic.clone())
    }

    /// Unicast to a single connection.
    pub fn send_to(&self, id: &str, text: &str) -> Result<()> {
        match self.connections.get(id) {
            Some(connection) => connection.send(text),
            None => Err(Error::UnknownConnection(id.to_string())),
        }
    }

    /// Applies `f` to every registered connection that is still open.
    ///
    /// Closed connections are skipped but left in place; they leave the
    /// registry through `remove` when their transport reports the disconnect.
    pub fn for_each_open<F>(&self, mut f: F)
    where
        F: FnMut(&Connection),
    {
        for entry in self.connections.iter() {
            if entry.is_open() {
                f(entry.value());
            }
        }
    }
}
