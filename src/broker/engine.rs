//! Broker engine
//!
//! The `Broker` owns the session registry and implements the three delivery
//! paths:
//! - the connection acknowledgement, unicast on register
//! - the subscription acknowledgement, unicast on subscribe
//! - topic-scoped broadcasts, stamped and sent to every open connection whose
//!   topic equals the target faculty
//!
//! Concurrency and usage notes:
//! - Every method takes `&self`; share the broker as `Arc<Broker>` between
//!   connection tasks. The registry synchronises internally.
//! - Admission (`try_register`) checks the connection cap and inserts under
//!   one short lock, so concurrent handshakes cannot overshoot the cap.
//!   Removal and broadcast never take it.
//! - Nothing here awaits. Sends go into per-connection unbounded channels and
//!   the transports do the socket I/O.
//! - Delivery is at-most-once. A connection that is gone when an event is
//!   broadcast simply misses it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::broker::message::{ServerEvent, Update};
use crate::broker::notifier::Notifier;
use crate::broker::registry::SessionRegistry;
use crate::connection::{Connection, ConnectionId};

#[derive(Debug)]
pub struct Broker {
    registry: SessionRegistry,
    max_connections: usize,
    admission: Mutex<()>,
}

impl Broker {
    /// Connection cap used when none is configured.
    pub const DEFAULT_MAX_CONNECTIONS: usize = 1000;
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CONNECTIONS)
    }
}

impl Broker {
    pub fn new(max_connections: usize) -> Self {
        Self {
            registry: SessionRegistry::new(),
            max_connections,
            admission: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// True once the configured connection cap is reached. Only a hint for
    /// refusing clients early; `try_register` is what enforces the cap.
    pub fn is_full(&self) -> bool {
        self.registry.len() >= self.max_connections
    }

    /// Handle for server-initiated broadcasts.
    pub fn notifier(self: &Arc<Self>) -> Notifier {
        Notifier::new(self.clone())
    }

    /// Registers a connection and sends it the connection acknowledgement.
    ///
    /// The acknowledgement is queued before the connection becomes visible
    /// to broadcasts, so it is always the first message the client sees.
    /// Does not check the connection cap.
    pub fn register(&self, connection: Connection) {
        let _admission = self.admission.lock().unwrap_or_else(|e| e.into_inner());
        self.admit(connection);
    }

    /// Registers a connection unless the connection cap is reached.
    ///
    /// Returns `false` and drops `connection` when the broker is full.
    pub fn try_register(&self, connection: Connection) -> bool {
        let _admission = self.admission.lock().unwrap_or_else(|e| e.into_inner());
        if self.registry.len() >= self.max_connections {
            warn!(connection = %connection.id, limit = self.max_connections, "connection limit reached, refusing client");
            return false;
        }
        self.admit(connection);
        true
    }

    fn admit(&self, connection: Connection) {
        let id = connection.id.clone();
        match ServerEvent::connected().to_json() {
            Ok(json) => {
                if let Err(e) = connection.send(&json) {
                    warn!(connection = %id, error = %e, "failed to send connection ack");
                }
            }
            Err(e) => error!(error = %e, "failed to serialize connection ack"),
        }
        self.registry.insert(connection);
        info!(connection = %id, total = self.registry.len(), "connection registered");
    }

    /// Removes a connection. Calling this for an unknown id is a no-op.
    pub fn unregister(&self, id: &ConnectionId) {
        if self.registry.remove(id).is_some() {
            info!(connection = %id, total = self.registry.len(), "connection removed");
        }
    }

    /// Points a connection at `faculty_id`, replacing any earlier topic, and
    /// acknowledges to that connection only.
    pub fn subscribe(&self, id: &ConnectionId, faculty_id: String) {
        let ack = ServerEvent::subscribed(&faculty_id);
        if !self.registry.set_topic(id, faculty_id.clone()) {
            debug!(connection = %id, faculty_id = %faculty_id, "subscribe from unknown or closed connection");
            return;
        }
        info!(connection = %id, faculty_id = %faculty_id, "connection subscribed");

        let text = match ack.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize subscribed ack");
                return;
            }
        };
        if let Err(e) = self.registry.send_to(id, &text) {
            warn!(connection = %id, error = %e, "failed to send subscribed ack");
        }
    }

    /// Stamps `update` with the current time and delivers it to every open
    /// connection subscribed to `faculty_id`.
    ///
    /// Returns how many connections the event was handed to. A failed send
    /// is logged and does not stop delivery to the rest.
    pub fn broadcast(&self, faculty_id: &str, update: Update) -> usize {
        let kind = update.kind();
        let event = update.stamp(Utc::now().timestamp_millis());
        let text = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!(kind, error = %e, "failed to serialize event");
                return 0;
            }
        };

        let mut delivered = 0;
        self.registry.for_each_open(|connection| {
            if !connection.is_subscribed_to(faculty_id) {
                return;
            }
            match connection.send(&text) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(connection = %connection.id, kind, error = %e, "failed to deliver event"),
            }
        });

        debug!(faculty_id, kind, delivered, "broadcast complete");
        delivered
    }

    /// Drops every registered connection. Called once on process shutdown.
    pub fn shutdown(&self) {
        let count = self.registry.len();
        self.registry.clear();
        info!(count, "broker shut down, connections released");
    }
}
