//! The `transport` module is responsible for handling network communication
//! with clients.
//!
//! It defines the inbound message protocol, decodes and dispatches client
//! messages to the broker, and implements both the native WebSocket endpoint
//! and the HTTP streaming fallback for clients that cannot upgrade.

pub mod dispatch;
pub mod fallback;
pub mod message;
pub mod websocket;

pub use dispatch::dispatch;
pub use fallback::{create_router, start_fallback_server};
pub use message::{ClientMessage, Command};
pub use websocket::start_websocket_server;
