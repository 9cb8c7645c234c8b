mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, Environment, File};

use crate::utils::Result;

pub use settings::{BrokerSettings, FallbackSettings, LoggingSettings, ServerSettings, Settings};

/// Default location of the optional settings file, relative to the working
/// directory and without extension.
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Prefix of environment overrides, e.g. `CAMPUS__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "CAMPUS";

/// Loads the configuration from the default file and environment variables.
pub fn load_config() -> Result<Settings> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Loads `path` (optional, any format `config` recognises by extension) and
/// the `CAMPUS__*` environment, then merges what is present onto the
/// defaults.
pub fn load_config_from(path: &str) -> Result<Settings> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            ws_path: partial
                .server
                .as_ref()
                .and_then(|s| s.ws_path.clone())
                .unwrap_or(default.server.ws_path),
        },
        broker: BrokerSettings {
            max_connections: partial
                .broker
                .as_ref()
                .and_then(|b| b.max_connections)
                .unwrap_or(default.broker.max_connections),
        },
        fallback: FallbackSettings {
            enabled: partial
                .fallback
                .as_ref()
                .and_then(|f| f.enabled)
                .unwrap_or(default.fallback.enabled),
            port: partial
                .fallback
                .as_ref()
                .and_then(|f| f.port)
                .unwrap_or(default.fallback.port),
            keep_alive_secs: partial
                .fallback
                .as_ref()
                .and_then(|f| f.keep_alive_secs)
                .unwrap_or(default.fallback.keep_alive_secs),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}
