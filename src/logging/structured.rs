// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Root slog loggers for backend repositories.
//!
//! Each repository writes through one root logger built here. Terminal and
//! JSON output go through `slog_async`, so emitting never blocks on IO.

use once_cell::sync::Lazy;
use slog::{Discard, Drain, Logger, o};
use slog_async::Async;
use slog_json::Json;
use slog_term::{FullFormat, TermDecorator};
use std::collections::HashSet;
use std::io;
use std::sync::{Mutex, PoisonError};
use serde::{Deserialize, Serialize};

/// Output format of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable terminal output
    #[default]
    Terminal,
    /// JSON formatted output
    Json,
    /// Drop every record
    Discard,
}

/// Output configuration of one repository's root logger
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output format
    pub format: LogFormat,
    /// Key-value pairs attached to every record
    pub static_fields: Vec<(String, String)>,
}

/// Create the root logger described by `config`.
pub fn create_logger(config: &OutputConfig) -> Logger {
    let logger = match config.format {
        LogFormat::Terminal => create_terminal_logger(),
        LogFormat::Json => create_json_logger(),
        LogFormat::Discard => Logger::root(Discard, o!()),
    };

    with_static_fields(logger, &config.static_fields)
}

/// Static field keys handed to slog, leaked once per distinct key.
static FIELD_KEYS: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// `&'static` copy of `key`, shared by every logger using it.
pub(crate) fn intern_key(key: &str) -> &'static str {
    let mut keys = FIELD_KEYS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(&interned) = keys.get(key) {
        return interned;
    }
    let interned: &'static str = Box::leak(key.to_owned().into_boxed_str());
    keys.insert(interned);
    interned
}

/// Attach static key-value pairs to `logger`.
pub fn with_static_fields(mut logger: Logger, fields: &[(String, String)]) -> Logger {
    for (key, value) in fields {
        logger = logger.new(o!(intern_key(key) => value.clone()));
    }

    logger
}

fn local_timestamp(io: &mut dyn io::Write) -> io::Result<()> {
    write!(io, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
}

fn create_terminal_logger() -> Logger {
    let decorator = TermDecorator::new().build();
    let drain = FullFormat::new(decorator)
        .use_custom_timestamp(local_timestamp)
        .build()
        .fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

fn create_json_logger() -> Logger {
    let drain = Json::new(io::stdout())
        .add_default_keys()
        .build()
        .fuse();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}
