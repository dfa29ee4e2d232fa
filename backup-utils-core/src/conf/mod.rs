mod error;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{
    DEFAULT_CONFIG_PATH, ENV_LOG_CHANNEL, ENV_LOG_DIR, ENV_STATS_DEFAULT_DAYS, ENV_STATS_MAX_DAYS,
    MAX_STATS_DAYS, load_config, load_config_with_env, parse_config_str, validate,
};
pub use types::{BackupUtilsConfig, ExportConfig, LoggingConfig, StatsConfig, ViewerConfig};
