use serde::Deserialize;

/// Top-level configuration settings for the application.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub broker: BrokerSettings,
    pub fallback: FallbackSettings,
    pub logging: LoggingSettings,
}

/// Where the native WebSocket endpoint listens.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Only upgrade requests for this path are accepted.
    pub ws_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub max_connections: usize,
}

/// HTTP streaming fallback for clients without WebSocket support.
///
/// Binds the same host as `server` on its own port.
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackSettings {
    pub enabled: bool,
    pub port: u16,
    pub keep_alive_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values are filled from
/// `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub broker: Option<PartialBrokerSettings>,
    pub fallback: Option<PartialFallbackSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub ws_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub max_connections: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialFallbackSettings {
    pub enabled: Option<bool>,
    pub port: Option<u16>,
    pub keep_alive_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                ws_path: "/ws/events".to_string(),
            },
            broker: BrokerSettings {
                max_connections: 1000,
            },
            fallback: FallbackSettings {
                enabled: true,
                port: 8081,
                keep_alive_secs: 15,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn websocket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn fallback_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.fallback.port)
    }
}
