//! Inbound message dispatch, shared by every transport.
//!
//! Text is decoded once into `ClientMessage` and matched exhaustively.
//! Anything that does not decode (bad JSON, unknown `type`, missing field) is
//! logged and dropped; the client gets no reply.

use tracing::{debug, warn};

use crate::broker::Broker;
use crate::connection::ConnectionId;
use crate::transport::message::{ClientMessage, Command};

/// How much of an undecodable message is echoed into the log.
const LOGGED_PREFIX_CHARS: usize = 100;

pub fn dispatch(broker: &Broker, connection_id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(err) => {
            warn!(
                connection = %connection_id,
                error = %err,
                "ignoring invalid client message: {}",
                text.chars().take(LOGGED_PREFIX_CHARS).collect::<String>()
            );
            return;
        }
    };

    match Command::from(message) {
        Command::Subscribe { faculty_id } => broker.subscribe(connection_id, faculty_id),
        Command::Broadcast { faculty_id, update } => {
            let kind = update.kind();
            let delivered = broker.broadcast(&faculty_id, update);
            debug!(connection = %connection_id, faculty_id = %faculty_id, kind, delivered, "client broadcast");
        }
    }
}
