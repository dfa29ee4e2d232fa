use crate::logs::VersionKeys;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolved configuration, built once at startup and handed to every command.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackupUtilsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl BackupUtilsConfig {
    /// Export directory, falling back to the log directory.
    pub fn export_dir(&self) -> &Path {
        self.export.dir.as_deref().unwrap_or(&self.logging.dir)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory holding `<prefix>.log` and `<prefix>-YYYY-MM-DD.log`.
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Channel token written in front of the level, e.g. `local.INFO`.
    #[serde(default = "default_channel")]
    pub channel: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file_prefix: default_file_prefix(),
            channel: default_channel(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("storage/logs")
}

fn default_file_prefix() -> String {
    "backup".to_string()
}

fn default_channel() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    #[serde(default = "default_viewer_days")]
    pub default_days: u32,

    #[serde(default = "default_tail")]
    pub default_tail: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_days: default_viewer_days(),
            default_tail: default_tail(),
        }
    }
}

fn default_viewer_days() -> u32 {
    7
}

fn default_tail() -> usize {
    50
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    #[serde(default = "default_stats_days")]
    pub default_days: u32,

    /// Upper bound for `stats --days`.
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    #[serde(default = "default_runtime_version_key")]
    pub runtime_version_key: String,

    #[serde(default = "default_framework_version_key")]
    pub framework_version_key: String,
}

impl StatsConfig {
    pub fn version_keys(&self) -> VersionKeys {
        VersionKeys {
            runtime: self.runtime_version_key.clone(),
            framework: self.framework_version_key.clone(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_days: default_stats_days(),
            max_days: default_max_days(),
            runtime_version_key: default_runtime_version_key(),
            framework_version_key: default_framework_version_key(),
        }
    }
}

fn default_stats_days() -> u32 {
    30
}

fn default_max_days() -> u32 {
    365
}

fn default_runtime_version_key() -> String {
    "php_version".to_string()
}

fn default_framework_version_key() -> String {
    "laravel_version".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}
