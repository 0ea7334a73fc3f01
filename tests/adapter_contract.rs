// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use std::io;

use common::{WrappedError, manager_with_repository};
use severity_bridge::core::NoFormatter;
use severity_bridge::{
    AdapterProvider, BackendLevel, EventId, LevelTranslatingAdapter, LogError, Logger, Severity,
};

#[test]
fn test_levels_follow_the_hierarchy() {
    let (manager, hierarchy, drain) = manager_with_repository("shop", BackendLevel::Warn);
    hierarchy.set_level("shop.payments", BackendLevel::Debug);

    let checkout = LevelTranslatingAdapter::resolve(&manager, "shop", "shop.checkout").unwrap();
    let gateway = LevelTranslatingAdapter::resolve(&manager, "shop", "shop.payments.gateway").unwrap();

    assert!(!checkout.is_enabled(Severity::Information));
    assert!(checkout.is_enabled(Severity::Warning));
    assert!(gateway.is_enabled(Severity::Trace));

    checkout.log_message(Severity::Information, None, "dropped").unwrap();
    checkout.log_message(Severity::Warning, None, "slow checkout").unwrap();
    gateway.log_message(Severity::Trace, None, "handshake").unwrap();

    let records = drain.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "slow checkout");
    assert_eq!(records[0].level, slog::Level::Warning);
    assert_eq!(records[1].message, "handshake");
    assert_eq!(records[1].level, slog::Level::Debug);
    assert_eq!(records[1].field("logger"), Some("shop.payments.gateway"));
}

#[test]
fn test_runtime_level_change_reaches_existing_adapters() {
    let (manager, hierarchy, drain) = manager_with_repository("shop", BackendLevel::Error);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop.stock").unwrap();
    assert!(!adapter.is_enabled(Severity::Information));

    hierarchy.set_level("shop", BackendLevel::Info);
    assert!(adapter.is_enabled(Severity::Information));
    adapter.log_message(Severity::Information, None, "restocked").unwrap();

    hierarchy.clear_level("shop");
    assert!(!adapter.is_enabled(Severity::Information));
    assert_eq!(drain.len(), 1);
}

#[test]
fn test_critical_is_written_once_at_critical() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Debug);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop").unwrap();

    adapter.log_message(Severity::Critical, None, "disk full").unwrap();

    let records = drain.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, slog::Level::Critical);
}

#[test]
fn test_error_chain_is_attached() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Debug);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop.db").unwrap();
    let error = WrappedError {
        message: "query failed",
        cause: io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
    };

    adapter
        .log(
            Severity::Error,
            EventId::named(3, "QueryFailed"),
            "",
            Some(&error),
            Some(|_: &&str, _: Option<&(dyn std::error::Error + 'static)>| String::new()),
        )
        .unwrap();

    let records = drain.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "");
    assert_eq!(records[0].field("error"), Some("query failed: connection reset"));
}

#[test]
fn test_empty_message_without_error_is_dropped() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Debug);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop").unwrap();

    adapter.log_message(Severity::Warning, None, "").unwrap();
    assert!(drain.is_empty());
}

#[test]
fn test_missing_formatter_only_fails_when_enabled() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Warn);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop").unwrap();

    let disabled = adapter.log(
        Severity::Debug,
        EventId::default(),
        42,
        None,
        None::<NoFormatter<i32>>,
    );
    assert!(disabled.is_ok());

    let enabled = adapter.log(
        Severity::Error,
        EventId::default(),
        42,
        None,
        None::<NoFormatter<i32>>,
    );
    assert_eq!(enabled, Err(LogError::MissingArgument("formatter")));
    assert!(drain.is_empty());
}

#[test]
fn test_raw_severity_values() {
    let (manager, _, _) = manager_with_repository("shop", BackendLevel::Info);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop").unwrap();

    assert_eq!(adapter.is_enabled_raw(0), Ok(false));
    assert_eq!(adapter.is_enabled_raw(2), Ok(true));
    assert_eq!(adapter.is_enabled_raw(5), Ok(true));
    assert_eq!(
        adapter.is_enabled_raw(6),
        Err(LogError::SeverityOutOfRange { value: 6 })
    );
}

#[test]
fn test_provider_shares_adapters_across_threads() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Info);
    let provider = std::sync::Arc::new(AdapterProvider::new(manager, "shop"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let provider = std::sync::Arc::clone(&provider);
            std::thread::spawn(move || {
                let adapter = provider.create_logger("shop.worker").unwrap();
                adapter
                    .log_message(Severity::Information, None, format!("worker {i} done"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(provider.len(), 1);
    assert_eq!(drain.len(), 4);
}

#[test]
fn test_scope_has_no_effect_on_output() {
    let (manager, _, drain) = manager_with_repository("shop", BackendLevel::Debug);
    let adapter = LevelTranslatingAdapter::resolve(&manager, "shop", "shop").unwrap();

    let scope = adapter.begin_scope("request 17");
    adapter.log_message(Severity::Information, None, "inside").unwrap();
    scope.close();

    let records = drain.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("request 17"), None);
}
