mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod providers_file;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use providers_file::ProvidersFile;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

pub const CONFIG_DIR_ENV: &str = "ONIGIRI_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".onigiri";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "onigiri.db";
const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
