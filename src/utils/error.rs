//! The `error` module defines the error type shared by every layer of
//! `campus_live`.
//!
//! Errors that reach a client connection are never surfaced to it; they are
//! logged where they occur. This type covers the operations that do
//! propagate, such as loading configuration or binding a listener.
//! Undecodable inbound client text never becomes an `Error`; the
//! dispatcher logs and drops it.

use thiserror::Error;

use crate::connection::ConnectionId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    #[error("no connection registered with id {0}")]
    UnknownConnection(ConnectionId),
}

pub type Result<T> = std::result::Result<T, Error>;
