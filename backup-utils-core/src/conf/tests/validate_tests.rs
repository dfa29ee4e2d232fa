use crate::conf::{BackupUtilsConfig, ConfigError, MAX_STATS_DAYS, validate};

fn invalid_field(config: &BackupUtilsConfig) -> &'static str {
    match validate(config) {
        Err(ConfigError::InvalidValue { field, .. }) => field,
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn defaults_are_valid() {
    assert!(validate(&BackupUtilsConfig::default()).is_ok());
}

#[test]
fn empty_prefix_is_rejected() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.logging.file_prefix = String::new();

    // Act / Assert
    assert_eq!(invalid_field(&config), "logging.file_prefix");
}

#[test]
fn prefix_with_separator_is_rejected() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.logging.file_prefix = "../backup".to_string();

    // Act / Assert
    assert_eq!(invalid_field(&config), "logging.file_prefix");
}

#[test]
fn channel_with_punctuation_is_rejected() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.logging.channel = "my-channel".to_string();

    // Act / Assert
    assert_eq!(invalid_field(&config), "logging.channel");
}

#[test]
fn zero_tail_is_rejected() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.viewer.default_tail = 0;

    // Act / Assert
    assert_eq!(invalid_field(&config), "viewer.default_tail");
}

#[test]
fn zero_max_days_is_rejected() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.stats.max_days = 0;
    config.stats.default_days = 0;

    // Act / Assert
    assert_eq!(invalid_field(&config), "stats.max_days");
}

#[test]
fn max_days_is_bounded() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.stats.max_days = MAX_STATS_DAYS;
    let mut oversized = config.clone();
    oversized.stats.max_days = MAX_STATS_DAYS + 1;

    // Act / Assert
    assert!(validate(&config).is_ok());
    assert_eq!(invalid_field(&oversized), "stats.max_days");
}

#[test]
fn default_days_equal_to_max_is_accepted() {
    // Arrange
    let mut config = BackupUtilsConfig::default();
    config.stats.default_days = 30;
    config.stats.max_days = 30;

    // Act / Assert
    assert!(validate(&config).is_ok());
}
