//! The `broker` module is the realtime core: it tracks live connections,
//! their faculty subscriptions, and fans topic-scoped events out to them.

pub mod engine;
pub mod message;
pub mod notifier;
pub mod registry;

pub use engine::Broker;
pub use message::{ServerEvent, Update};
pub use notifier::Notifier;
pub use registry::SessionRegistry;
