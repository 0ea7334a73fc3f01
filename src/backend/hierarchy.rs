// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single logger repository: dotted logger names over one slog root.

use std::collections::{BTreeMap, HashMap};
use std::error::Error as StdError;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use slog::{Logger, o};

use super::{BackendLevel, BackendLogger};
use crate::core::ErrorRef;

/// Name of the root logger of every hierarchy.
pub const ROOT_LOGGER_NAME: &str = "root";

/// Canonical form of a dotted logger name.
///
/// Segments are trimmed and empty segments dropped, so `" app..db "` becomes
/// `"app.db"`. A name with no segments left is the root logger.
pub fn canonical_name(name: &str) -> String {
    let joined = name
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    if joined.is_empty() {
        ROOT_LOGGER_NAME.to_string()
    } else {
        joined
    }
}

/// Render an error followed by its source chain, joined by `": "`.
pub(crate) fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[derive(Debug)]
struct LoggerNode {
    name: String,
    level: AtomicU8,
    logger: Logger,
}

#[derive(Debug)]
struct HierarchyState {
    root_level: BackendLevel,
    overrides: BTreeMap<String, BackendLevel>,
    nodes: HashMap<String, Arc<LoggerNode>>,
}

impl HierarchyState {
    /// Level of the closest ancestor (or self) with an override.
    fn resolve(&self, canonical: &str) -> BackendLevel {
        let mut candidate = canonical;
        loop {
            if let Some(level) = self.overrides.get(candidate) {
                return *level;
            }
            match candidate.rfind('.') {
                Some(idx) => candidate = &candidate[..idx],
                None => return self.root_level,
            }
        }
    }

    fn refresh(&self) {
        for (name, node) in &self.nodes {
            node.level.store(self.resolve(name).as_u8(), Ordering::Release);
        }
    }
}

/// A logger repository backed by one slog root logger.
///
/// Every resolved logger is a child of the root carrying a `logger` key with
/// its canonical name. Loggers are cached, so resolving the same name twice
/// yields handles sharing one underlying node.
pub struct Hierarchy {
    root: Logger,
    state: RwLock<HierarchyState>,
}

impl fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hierarchy")
            .field("root_level", &self.root_level())
            .finish_non_exhaustive()
    }
}

impl Hierarchy {
    /// Create a hierarchy writing to `root` with the given root level.
    pub fn new(root: Logger, root_level: BackendLevel) -> Self {
        Self {
            root,
            state: RwLock::new(HierarchyState {
                root_level,
                overrides: BTreeMap::new(),
                nodes: HashMap::new(),
            }),
        }
    }

    /// Level of the root logger.
    pub fn root_level(&self) -> BackendLevel {
        self.state.read().unwrap_or_else(PoisonError::into_inner).root_level
    }

    /// Set the level of `name` and every descendant without its own level.
    ///
    /// Setting the level of the root logger changes the root level.
    /// Already resolved handles observe the change immediately.
    pub fn set_level(&self, name: &str, level: BackendLevel) {
        let canonical = canonical_name(name);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if canonical == ROOT_LOGGER_NAME {
            state.root_level = level;
        } else {
            state.overrides.insert(canonical, level);
        }
        state.refresh();
    }

    /// Remove the level configured for `name`, so it inherits again.
    pub fn clear_level(&self, name: &str) {
        let canonical = canonical_name(name);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.overrides.remove(&canonical).is_some() {
            state.refresh();
        }
    }

    /// Effective level of `name` as it would be resolved now.
    pub fn effective_level(&self, name: &str) -> BackendLevel {
        let canonical = canonical_name(name);
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(&canonical)
    }

    /// Resolve the logger `name`, creating it on first use.
    pub fn logger(&self, name: &str) -> HierarchyLogger {
        let canonical = canonical_name(name);

        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(node) = state.nodes.get(&canonical) {
                return HierarchyLogger { node: Arc::clone(node) };
            }
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let level = state.resolve(&canonical);
        let node = state
            .nodes
            .entry(canonical.clone())
            .or_insert_with(|| {
                Arc::new(LoggerNode {
                    logger: self.root.new(o!("logger" => canonical.clone())),
                    name: canonical,
                    level: AtomicU8::new(level.as_u8()),
                })
            });

        HierarchyLogger { node: Arc::clone(node) }
    }

    /// Names of all loggers resolved so far.
    pub fn logger_names(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = state.nodes.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Handle to one logger of a [`Hierarchy`].
#[derive(Debug, Clone)]
pub struct HierarchyLogger {
    node: Arc<LoggerNode>,
}

impl HierarchyLogger {
    /// Current effective level of this logger.
    pub fn level(&self) -> BackendLevel {
        BackendLevel::from_u8(self.node.level.load(Ordering::Acquire))
    }

    /// Whether this handle shares its node with `other`.
    pub fn same_logger(&self, other: &HierarchyLogger) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn enabled(&self, level: BackendLevel) -> bool {
        level != BackendLevel::Off && level >= self.level()
    }

    fn emit(&self, level: BackendLevel, message: &str, error: Option<ErrorRef<'_>>) {
        if !self.enabled(level) {
            return;
        }
        let logger = &self.node.logger;
        let chain = error.map(error_chain);

        macro_rules! write_at {
            ($level:ident) => {
                match &chain {
                    Some(chain) => slog::$level!(logger, "{}", message; "error" => chain.as_str()),
                    None => slog::$level!(logger, "{}", message),
                }
            };
        }

        match level {
            BackendLevel::Debug => write_at!(debug),
            BackendLevel::Info => write_at!(info),
            BackendLevel::Warn => write_at!(warn),
            BackendLevel::Error => write_at!(error),
            BackendLevel::Fatal => write_at!(crit),
            BackendLevel::Off => {}
        }
    }
}

impl BackendLogger for HierarchyLogger {
    fn name(&self) -> &str {
        &self.node.name
    }

    fn is_debug_enabled(&self) -> bool {
        self.enabled(BackendLevel::Debug)
    }

    fn is_info_enabled(&self) -> bool {
        self.enabled(BackendLevel::Info)
    }

    fn is_warn_enabled(&self) -> bool {
        self.enabled(BackendLevel::Warn)
    }

    fn is_error_enabled(&self) -> bool {
        self.enabled(BackendLevel::Error)
    }

    fn is_fatal_enabled(&self) -> bool {
        self.enabled(BackendLevel::Fatal)
    }

    fn debug(&self, message: &str, error: Option<ErrorRef<'_>>) {
        self.emit(BackendLevel::Debug, message, error);
    }

    fn info(&self, message: &str, error: Option<ErrorRef<'_>>) {
        self.emit(BackendLevel::Info, message, error);
    }

    fn warn(&self, message: &str, error: Option<ErrorRef<'_>>) {
        self.emit(BackendLevel::Warn, message, error);
    }

    fn error(&self, message: &str, error: Option<ErrorRef<'_>>) {
        self.emit(BackendLevel::Error, message, error);
    }

    fn fatal(&self, message: &str, error: Option<ErrorRef<'_>>) {
        self.emit(BackendLevel::Fatal, message, error);
    }
}
