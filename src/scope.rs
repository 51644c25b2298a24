// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named logging scopes.
//!
//! A [`Manager`] hands out one [`Logger`] per named scope so that subsystems of an
//! application can be made more or less verbose independently while all of them
//! write to the root logger's sink.
//!
//! ```rust
//! use logscope::{kv, InMemorySink, Level, Logger, Manager};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let manager = Manager::new(Logger::new(sink.clone()));
//!
//! let db = manager.register("db", "database access");
//! let http = manager.register("http", "request handling");
//!
//! manager.set_scope_output_level("db", Level::Debug).unwrap();
//! db.debug("query planned", kv!["rows", 3]);
//! http.debug("not shown", kv![]);
//!
//! assert_eq!(sink.drain_logs(), "msg=\"query planned\" level=debug rows=3");
//! assert_eq!(manager.scopes(), ["db", "http"]);
//! ```
//!
//! # Names
//!
//! Scope names are trimmed of surrounding whitespace and control characters and
//! lower-cased before use, so `" DB\n"` and `"db"` name the same scope.
//!
//! # Levels
//!
//! A new scope starts at the manager's current default level, in a level cell of its
//! own. From then on the two are unrelated, except that
//! [`set_default_output_level`](Manager::set_default_output_level) overwrites every
//! scope with the new default.
//!
//! # Thread Safety
//!
//! The registry is guarded by a single mutex, held only around map access. Level
//! reads and writes on loggers already handed out never touch it.

use crate::error::Error;
use crate::logger::Logger;
use crate::{Level, kv};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Names are padded to at least this width in the scope listing.
const MIN_NAME_WIDTH: usize = "default".len();

#[derive(Debug)]
struct Scope {
    name: String,
    description: String,
    logger: Logger,
}

/// A registry of named scopes sharing one root logger's sink.
#[derive(Debug)]
pub struct Manager {
    root: Logger,
    registry: Mutex<BTreeMap<String, Scope>>,
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_lowercase()
}

impl Manager {
    /**
    Creates a manager around `root`.

    `root` holds the default output level and provides the sink for every scope.
    The manager shares `root`'s level, so setting the default through the manager
    is visible on `root` and vice versa.
    */
    pub fn new(root: Logger) -> Self {
        Self {
            root,
            registry: Mutex::new(BTreeMap::new()),
        }
    }

    fn registry(&self) -> MutexGuard<'_, BTreeMap<String, Scope>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The unscoped logger.
    pub fn root(&self) -> &Logger {
        &self.root
    }

    /**
    Returns the logger for scope `name`, registering it if necessary.

    Registering a name that already exists returns the existing logger (sharing its
    level) and ignores `description`.
    */
    pub fn register(&self, name: &str, description: &str) -> Logger {
        let name = normalize_name(name);
        let logger = {
            let mut registry = self.registry();
            if let Some(scope) = registry.get(&name) {
                return scope.logger.clone();
            }
            let logger = self.root.detached();
            registry.insert(
                name.clone(),
                Scope {
                    name: name.clone(),
                    description: description.to_string(),
                    logger: logger.clone(),
                },
            );
            logger
        };
        self.root
            .debug("registered logging scope", kv!["scope", name.as_str()]);
        logger
    }

    /**
    Removes scope `name`, returning whether it existed.

    Loggers already handed out for the scope keep working at their last level; the
    manager just stops tracking them. A later registration of the same name creates
    a new scope.
    */
    pub fn deregister(&self, name: &str) -> bool {
        let name = normalize_name(name);
        let removed = self.registry().remove(&name).is_some();
        if removed {
            self.root
                .debug("deregistered logging scope", kv!["scope", name.as_str()]);
        }
        removed
    }

    /// The registered scope names, sorted.
    pub fn scopes(&self) -> Vec<String> {
        self.registry().keys().cloned().collect()
    }

    /// Sets the root level and overwrites every registered scope's level with it.
    pub fn set_default_output_level(&self, level: Level) {
        self.root.set_level(level);
        for scope in self.registry().values() {
            scope.logger.set_level(level);
        }
    }

    /// Sets the level of scope `name` only.
    pub fn set_scope_output_level(&self, name: &str, level: Level) -> Result<(), Error> {
        let logger = self.scope_logger(name)?;
        logger.set_level(level);
        Ok(())
    }

    pub fn default_output_level(&self) -> Level {
        self.root.level()
    }

    pub fn output_level(&self, name: &str) -> Result<Level, Error> {
        Ok(self.scope_logger(name)?.level())
    }

    fn scope_logger(&self, name: &str) -> Result<Logger, Error> {
        let name = normalize_name(name);
        self.registry()
            .get(&name)
            .map(|scope| scope.logger.clone())
            .ok_or(Error::ScopeNotFound(name))
    }

    /**
    Writes the default level and every scope's name, level and description.

    ```text
    registered logging scopes:
    - default [info ]
    - db      [debug]  database access
    ```
    */
    pub fn write_registered_scopes<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let rows: Vec<(String, Level, String)> = self
            .registry()
            .values()
            .map(|s| (s.name.clone(), s.logger.level(), s.description.clone()))
            .collect();
        let pad = rows
            .iter()
            .map(|(name, _, _)| name.chars().count())
            .fold(MIN_NAME_WIDTH, usize::max);

        writeln!(writer, "registered logging scopes:")?;
        writeln!(
            writer,
            "- {:<pad$} [{:<5}]  ",
            "default",
            self.default_output_level().as_str()
        )?;
        for (name, level, description) in rows {
            writeln!(writer, "- {name:<pad$} [{:<5}]  {description}", level.as_str())?;
        }
        Ok(())
    }

    /// [`write_registered_scopes`](Self::write_registered_scopes) to stdout.
    pub fn print_registered_scopes(&self) {
        // stdout going away is not worth failing over
        let _ = self.write_registered_scopes(std::io::stdout().lock());
    }
}
