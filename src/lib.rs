//! # campus-live
//!
//! `campus_live` is the realtime core of the campus app backend: it pushes
//! events and clubs updates to connected clients, scoped by faculty.
//!
//! ## Core Modules
//!
//! - `broker`: the session registry, topic-filtered broadcast, and the
//!   `Notifier` other backend components use to publish updates.
//! - `connection`: the server-side handle of one client channel.
//! - `config`: loads and merges server configuration.
//! - `transport`: the WebSocket endpoint, the HTTP streaming fallback, and
//!   inbound message dispatch.
//! - `utils`: the crate error type and logging setup.

pub mod broker;
pub mod config;
pub mod connection;
pub mod transport;
pub mod utils;

pub use broker::{Broker, Notifier};
