use crate::conf::error::ConfigError;
use crate::conf::types::BackupUtilsConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "config/backup-utils.hcl";

pub const ENV_LOG_DIR: &str = "BACKUP_LOG_DIR";
pub const ENV_LOG_CHANNEL: &str = "BACKUP_LOG_CHANNEL";
pub const ENV_STATS_DEFAULT_DAYS: &str = "BACKUP_STATS_DEFAULT_DAYS";
pub const ENV_STATS_MAX_DAYS: &str = "BACKUP_STATS_MAX_DAYS";

/// Upper bound accepted for `stats.max_days`; each day is one file probe.
pub const MAX_STATS_DAYS: u32 = 3650;

/// Load the configuration from `path` (or the default location) and the
/// process environment.
pub fn load_config(path: Option<&Path>) -> Result<BackupUtilsConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `env`.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<BackupUtilsConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.is_file() {
                parse_file(&default)?
            } else {
                tracing::debug!(path = %default.display(), "no config file, using defaults");
                BackupUtilsConfig::default()
            }
        }
    };

    //--------------------------------------------------------------------------
    // Environment overrides
    //--------------------------------------------------------------------------
    apply_env(&mut config, env)?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    validate(&config)?;

    Ok(config)
}

/// Parse an HCL document without touching the filesystem or environment.
pub fn parse_config_str(src: &str, origin: &Path) -> Result<BackupUtilsConfig, ConfigError> {
    hcl::from_str(src).map_err(|e| ConfigError::parse(origin, e))
}

fn parse_file(path: &Path) -> Result<BackupUtilsConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = parse_config_str(&src, path)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

fn apply_env<F>(config: &mut BackupUtilsConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = env(ENV_LOG_DIR) {
        config.logging.dir = PathBuf::from(dir);
    }
    if let Some(channel) = env(ENV_LOG_CHANNEL) {
        config.logging.channel = channel;
    }
    if let Some(days) = env(ENV_STATS_DEFAULT_DAYS) {
        config.stats.default_days = parse_env(ENV_STATS_DEFAULT_DAYS, &days)?;
    }
    if let Some(days) = env(ENV_STATS_MAX_DAYS) {
        config.stats.max_days = parse_env(ENV_STATS_MAX_DAYS, &days)?;
    }
    Ok(())
}

fn parse_env<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

pub fn validate(config: &BackupUtilsConfig) -> Result<(), ConfigError> {
    let prefix = &config.logging.file_prefix;
    if prefix.is_empty() {
        return Err(ConfigError::invalid(
            "logging.file_prefix",
            "must not be empty",
        ));
    }
    if prefix.contains(['/', '\\']) {
        return Err(ConfigError::invalid(
            "logging.file_prefix",
            format!("'{prefix}' must not contain path separators"),
        ));
    }
    let channel = &config.logging.channel;
    if channel.is_empty() {
        return Err(ConfigError::invalid("logging.channel", "must not be empty"));
    }
    if !channel.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::invalid(
            "logging.channel",
            format!("'{channel}' may only contain letters, digits and '_'"),
        ));
    }
    if config.viewer.default_tail == 0 {
        return Err(ConfigError::invalid(
            "viewer.default_tail",
            "must be greater than zero",
        ));
    }
    if config.stats.max_days == 0 {
        return Err(ConfigError::invalid(
            "stats.max_days",
            "must be greater than zero",
        ));
    }
    if config.stats.max_days > MAX_STATS_DAYS {
        return Err(ConfigError::invalid(
            "stats.max_days",
            format!(
                "{} exceeds the supported maximum of {MAX_STATS_DAYS}",
                config.stats.max_days
            ),
        ));
    }
    if config.stats.default_days > config.stats.max_days {
        return Err(ConfigError::invalid(
            "stats.default_days",
            format!(
                "{} exceeds stats.max_days ({})",
                config.stats.default_days, config.stats.max_days
            ),
        ));
    }
    Ok(())
}
