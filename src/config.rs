//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::error::ServiceError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port. The listener always binds 0.0.0.0.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Background Processing ===
    /// Delay before a scheduled processing task marks its item, in seconds.
    #[serde(default = "default_process_delay")]
    pub process_delay_seconds: u64,

    // === WebSocket ===
    /// Interval between WebSocket ping frames, in seconds.
    #[serde(default = "default_ws_ping")]
    pub ws_ping_seconds: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    8000
}

fn default_process_delay() -> u64 {
    5
}

fn default_ws_ping() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.port == 0 {
            return Err(ServiceError::InvalidConfig(
                "PORT must be non-zero".to_string(),
            ));
        }

        if self.process_delay_seconds == 0 {
            return Err(ServiceError::InvalidConfig(
                "PROCESS_DELAY_SECONDS must be non-zero".to_string(),
            ));
        }

        if self.ws_ping_seconds == 0 {
            return Err(ServiceError::InvalidConfig(
                "WS_PING_SECONDS must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Processing delay as a [`std::time::Duration`].
    pub fn process_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.process_delay_seconds)
    }

    /// WebSocket ping interval as a [`std::time::Duration`].
    pub fn ws_ping(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ws_ping_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            process_delay_seconds: default_process_delay(),
            ws_ping_seconds: default_ws_ping(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}
