//! Configuration loading tests

use std::time::Duration;

use tempfile::TempDir;
use wiring_domain::error::Error;
use wiring_domain::value_objects::Scope;
use wiring_infrastructure::config::loader::validate_app_config;
use wiring_infrastructure::config::{AppConfig, ConfigLoader, ContainerConfig};

#[test]
fn test_container_config_defaults() {
    let config = ContainerConfig::default();

    assert_eq!(config.default_scope, Scope::Singleton);
    assert_eq!(config.bootstrap_timeout(), None);
    assert!(config.validate_graph);
    assert!(!config.eager_singletons);
}

#[test]
fn test_container_config_builders() {
    let config = ContainerConfig::default()
        .with_default_scope(Scope::Transient)
        .with_bootstrap_timeout(Duration::from_secs(2))
        .with_eager_singletons(true)
        .with_validate_graph(false);

    assert_eq!(config.default_scope, Scope::Transient);
    assert_eq!(config.bootstrap_timeout_ms, Some(2000));
    assert_eq!(config.bootstrap_timeout(), Some(Duration::from_secs(2)));
    assert!(config.eager_singletons);
    assert!(!config.validate_graph);
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wiring.toml");
    std::fs::write(
        &path,
        r#"
[container]
default_scope = "transient"
bootstrap_timeout_ms = 1500

[logging]
level = "debug"
json_format = true
"#,
    )
    .expect("write config");

    let config = ConfigLoader::new()
        .with_env_prefix("WIRING_TEST_TOML")
        .with_config_path(&path)
        .load()
        .expect("load");

    assert_eq!(config.container.default_scope, Scope::Transient);
    assert_eq!(config.container.bootstrap_timeout_ms, Some(1500));
    assert!(config.container.validate_graph);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("tempdir");

    let loader = ConfigLoader::new()
        .with_env_prefix("WIRING_TEST_MISSING")
        .with_config_path(dir.path().join("absent.toml"));
    let config = loader.load().expect("load");

    assert_eq!(config.container, ContainerConfig::default());
    assert_eq!(config.logging.level, "info");
    assert!(loader.config_path().is_some());
}

#[test]
fn test_zero_timeout_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wiring.toml");
    std::fs::write(&path, "[container]\nbootstrap_timeout_ms = 0\n").expect("write config");

    let err = ConfigLoader::new()
        .with_env_prefix("WIRING_TEST_ZERO")
        .with_config_path(&path)
        .load()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_unknown_scope_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wiring.toml");
    std::fs::write(&path, "[container]\ndefault_scope = \"request\"\n").expect("write config");

    let result = ConfigLoader::new()
        .with_env_prefix("WIRING_TEST_SCOPE")
        .with_config_path(&path)
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_validate_rejects_bad_logging_settings() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.max_files = 0;
    assert!(validate_app_config(&config).is_err());

    assert!(validate_app_config(&AppConfig::default()).is_ok());
}

#[test]
fn test_saved_config_loads_back() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("saved.toml");
    let mut config = AppConfig::default();
    config.container.default_scope = Scope::Transient;
    config.container.eager_singletons = true;

    let loader = ConfigLoader::new().with_env_prefix("WIRING_TEST_SAVE");
    loader.save_to_file(&config, &path).expect("save");
    let loaded = loader.with_config_path(&path).load().expect("load");

    assert_eq!(loaded.container, config.container);
}
