use std::fs;

use gagyebu_config::{Config, ConfigError, ConfigManager, StoreBackend};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");

    let config = manager.load().expect("load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.currency_suffix, "원");
    assert_eq!(config.backend, StoreBackend::Json);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut config = Config::default();
    config.backend = StoreBackend::Memory;
    config.ledger_name = "우리집".into();
    config.grouping_separator = '.';
    config.categories.expense.push("외식".into());

    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, config);
    assert!(manager.config_path().exists());
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn partial_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(
        manager.config_path(),
        r#"{"categories":{"income":["월급"],"expense":["식비"]}}"#,
    )
    .unwrap();

    let config = manager.load().expect("load config");

    assert_eq!(config.ledger_name, "default");
    assert_eq!(config.categories.income, vec!["월급".to_string()]);
    assert_eq!(config.categories.palette.len(), 10);
}

#[test]
fn single_setting_file_loads() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), r#"{"backend":"memory"}"#).unwrap();

    let config = manager.load().expect("load config");

    assert_eq!(config.backend, StoreBackend::Memory);
    assert_eq!(config.ledger_name, "default");
    assert_eq!(config.categories, Config::default().categories);
}

#[test]
fn unknown_keys_from_older_files_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(
        manager.config_path(),
        r#"{"locale":"ko-KR","ledger_name":"우리집"}"#,
    )
    .unwrap();

    let config = manager.load().expect("load config");

    assert_eq!(config.ledger_name, "우리집");
}

#[test]
fn invalid_registry_is_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(
        manager.config_path(),
        r#"{"categories":{"income":[],"expense":["식비"],"palette":[]}}"#,
    )
    .unwrap();

    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), "not json").unwrap();

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}
