// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use std::sync::Arc;

use common::{config_file, memory_root};
use serial_test::serial;
use severity_bridge::{
    BackendLevel, BridgeLoader, LoaderError, LogManager, Logger, Severity, DEFAULT_REPOSITORY,
};

const YAML_CONFIG: &str = r#"
repositories:
  default:
    level: info
    static_fields:
      service: inventory
    loggers:
      inventory.sync: debug
  audit:
    level: warn
"#;

#[test]
fn test_yaml_repositories_end_to_end() {
    let file = config_file(".yaml", YAML_CONFIG);
    let (root, drain) = memory_root();
    let manager = Arc::new(LogManager::new());

    let bridge = BridgeLoader::new()
        .with_config_file(file.path().to_str().unwrap())
        .with_manager(Arc::clone(&manager))
        .with_root_logger(root)
        .build()
        .unwrap();

    assert_eq!(bridge.repositories(), ["audit".to_string(), DEFAULT_REPOSITORY.to_string()]);

    let sync = bridge.adapter(DEFAULT_REPOSITORY, "inventory.sync.batch").unwrap();
    let api = bridge.adapter(DEFAULT_REPOSITORY, "inventory.api").unwrap();
    let audit = bridge.adapter("audit", "audit.login").unwrap();

    assert!(sync.is_enabled(Severity::Debug));
    assert!(!api.is_enabled(Severity::Debug));
    assert!(!audit.is_enabled(Severity::Information));

    sync.log_message(Severity::Debug, None, "batch 4 of 9").unwrap();
    audit.log_message(Severity::Error, None, "login denied").unwrap();

    let records = drain.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field("service"), Some("inventory"));
    assert_eq!(records[0].field("logger"), Some("inventory.sync.batch"));
    assert_eq!(records[1].field("service"), None);
    assert_eq!(records[1].message, "login denied");
}

#[test]
fn test_unknown_format_is_rejected() {
    let file = config_file(".json", r#"{"repositories": {"default": {"format": "xml"}}}"#);

    let result = BridgeLoader::new()
        .with_config_file(file.path().to_str().unwrap())
        .with_manager(Arc::new(LogManager::new()))
        .build();

    match result {
        Err(LoaderError::ConfigError(e)) => assert!(e.to_string().contains("xml")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_configured_formats_build_without_root_override() {
    let file = config_file(
        ".toml",
        "[repositories.quiet]\nformat = \"discard\"\n\n[repositories.machine]\nformat = \"json\"\nlevel = \"off\"\n",
    );
    let manager = Arc::new(LogManager::new());

    let bridge = BridgeLoader::new()
        .with_config_file(file.path().to_str().unwrap())
        .with_manager(Arc::clone(&manager))
        .build()
        .unwrap();

    let quiet = bridge.adapter("quiet", "anything").unwrap();
    assert!(quiet.is_enabled(Severity::Debug));
    quiet.log_message(Severity::Information, None, "into the void").unwrap();

    let machine = bridge.adapter("machine", "anything").unwrap();
    assert!(!machine.is_enabled(Severity::Critical));
    assert_eq!(
        manager.repository("machine").unwrap().root_level(),
        BackendLevel::Off
    );
}

#[test]
#[serial]
fn test_default_env_prefix_overrides_level() {
    unsafe {
        std::env::set_var("SEVERITY_BRIDGE_REPOSITORIES_DEFAULT_LEVEL", "error");
        std::env::set_var("SEVERITY_BRIDGE_REPOSITORIES_DEFAULT_LOGGERS_NOISY", "off");
    }

    let (root, _) = memory_root();
    let manager = Arc::new(LogManager::new());
    let result = BridgeLoader::new()
        .with_env_vars()
        .with_manager(Arc::clone(&manager))
        .with_root_logger(root)
        .build();

    unsafe {
        std::env::remove_var("SEVERITY_BRIDGE_REPOSITORIES_DEFAULT_LEVEL");
        std::env::remove_var("SEVERITY_BRIDGE_REPOSITORIES_DEFAULT_LOGGERS_NOISY");
    }

    let bridge = result.unwrap();
    let hierarchy = manager.repository(DEFAULT_REPOSITORY).unwrap();
    assert_eq!(hierarchy.root_level(), BackendLevel::Error);
    assert_eq!(hierarchy.effective_level("noisy.child"), BackendLevel::Off);

    let adapter = bridge.adapter(DEFAULT_REPOSITORY, "app").unwrap();
    assert!(!adapter.is_enabled(Severity::Warning));
    assert!(adapter.is_enabled(Severity::Error));
}

#[test]
#[serial]
fn test_install_facade_routes_log_macros() {
    let (root, drain) = memory_root();
    let bridge = BridgeLoader::new()
        .with_manager(Arc::new(LogManager::new()))
        .with_root_logger(root)
        .build()
        .unwrap();

    // Only one global logger per test binary.
    let provider = bridge
        .install_facade(DEFAULT_REPOSITORY, log::LevelFilter::Debug)
        .unwrap();

    log::error!(target: "inventory::import", "row {} rejected", 17);

    assert!(
        drain
            .records()
            .iter()
            .any(|r| r.message == "row 17 rejected" && r.field("logger") == Some("inventory.import"))
    );
    assert!(provider.len() >= 1);
    assert!(matches!(
        bridge.install_facade(DEFAULT_REPOSITORY, log::LevelFilter::Info),
        Err(LoaderError::FacadeError(_))
    ));
}
