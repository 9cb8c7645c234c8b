//! The `utils` module provides shared building blocks used across the
//! `campus_live` crate: the crate-wide error type and logging setup.

pub mod error;
pub mod logging;

pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::{Error, logging};

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
        logging::init("nonsense");
    }

    #[test]
    fn error_converts_from_json_and_websocket() {
        let json = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::from(json);
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("json error:"));

        let err = Error::from(tungstenite::Error::ConnectionClosed);
        assert!(matches!(err, Error::WebSocket(_)));
    }
}
