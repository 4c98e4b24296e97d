use std::fs;

use smartshopr::config::LoggingConfig;
use smartshopr::logger;

#[test]
fn test_logging_disabled_returns_no_path() {
    let config = LoggingConfig::default();
    assert!(!config.enabled);
    assert_eq!(logger::init(&config).unwrap(), None);
}

#[test]
fn test_invalid_level_is_rejected() {
    let config = LoggingConfig {
        enabled: true,
        level: "chatty".to_string(),
        stderr: false,
    };
    assert!(logger::init(&config).is_err());
}

#[test]
fn test_enabled_logging_writes_to_file() {
    let config = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
        stderr: false,
    };

    // No writable data directory on this machine
    let Ok(path) = logger::init(&config) else {
        return;
    };
    let path = path.unwrap();
    assert_eq!(Some(path.clone()), logger::get_log_file_path().ok());

    log::debug!(target: "smartshopr::tests", "Test message with file");
    log::logger().flush();

    let content = fs::read_to_string(&path).unwrap_or_default();
    assert!(content.contains("Test message with file"));
    assert!(content.contains("DEBUG"));
}
