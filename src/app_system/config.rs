use clap::{Parser, ValueEnum};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Storefront configuration, from CLI arguments with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", about = "Storefront checkout core", long_about = None)]
pub struct AppConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Mailbox size of each store actor
    #[arg(long, env = "STORE_CHANNEL_CAPACITY", default_value_t = 32)]
    pub channel_capacity: usize,
}

impl AppConfig {
    /// Loads `.env` if present, then parses arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
            channel_capacity: 32,
        }
    }
}
