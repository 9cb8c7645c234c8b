//! The `connection` module defines the server-side view of one client channel.
//!
//! A `Connection` is transport-agnostic: the WebSocket endpoint and the HTTP
//! streaming fallback both hand the broker the sending half of a per-client
//! channel and forward whatever arrives on it to the wire.

pub mod session;
pub use session::{Connection, ConnectionId, ConnectionState};

#[cfg(test)]
mod tests;
