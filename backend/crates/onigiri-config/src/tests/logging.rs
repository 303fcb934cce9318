use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, LogLevel, LoggingConfig};

use std::str::FromStr;

use googletest::prelude::*;
use log::LevelFilter;
use serial_test::serial;

#[test]
fn given_known_level_names_when_parsed_then_matching_filter() {
    let cases = [
        ("off", LevelFilter::Off),
        ("ERROR", LevelFilter::Error),
        ("warn", LevelFilter::Warn),
        (" debug ", LevelFilter::Debug),
        ("trace", LevelFilter::Trace),
    ];

    for (raw, expected) in cases {
        let Ok(level) = LogLevel::from_str(raw);
        assert_that!(*level, eq(expected));
    }
}

#[test]
fn given_unknown_level_name_when_parsed_then_info() {
    let Ok(level) = LogLevel::from_str("verbose");

    assert_that!(*level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_log_env_vars_when_load_then_overrides_applied() {
    // Given
    let (_temp, _dir, _secret) = setup_config_dir();
    let _level = EnvGuard::set("ONIGIRI_LOG_LEVEL", "trace");
    let _file = EnvGuard::set("ONIGIRI_LOG_FILE", "logs/onigiri.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Trace));
    assert_that!(config.logging.file.as_deref(), some(eq("logs/onigiri.log")));
    assert_that!(config.log_file_path().unwrap(), some(anything()));
}

#[test]
fn given_absolute_log_file_when_validate_then_error() {
    let config = LoggingConfig {
        file: Some("/var/log/onigiri.log".to_string()),
        ..LoggingConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_no_log_file_when_validate_then_ok() {
    assert_that!(LoggingConfig::default().validate(), ok(anything()));
}
