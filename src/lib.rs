//! ORS Monitor core library
//!
//! Optic Risk Score monitoring for prone-position surgery: the scoring
//! server, its HTTP client, and the dashboard and research views.

pub mod api;
pub mod client;
pub mod core;
pub mod models;
pub mod ui;
pub mod utils;

/// Application configuration
pub mod config {
    use serde::Deserialize;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        pub client: ClientConfig,
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ClientConfig {
        pub base_url: String,
        /// Unset means requests wait indefinitely.
        pub timeout_secs: Option<u64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LoggingConfig {
        pub json: bool,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("ORS_ENV").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5001)?
            .set_default("client.base_url", DEFAULT_BASE_URL)?
            .set_default("logging.json", false)?
            // Start with default settings
            .add_source(config::File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("ORS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
