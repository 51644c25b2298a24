// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuring scope levels from a single string.
//!
//! The format is a comma-separated list of tokens:
//!
//! ```text
//! [default_level,]<scope>:<level>,<scope>:<level>,...
//! ```
//!
//! A bare level sets the default for every scope (see
//! [`Manager::set_default_output_level`]); a `scope:level` pair sets one scope.
//! Tokens apply left to right, matching is case-insensitive, and whitespace around
//! names is ignored. A bad token does not stop the rest from being applied; all
//! problems come back together as one [`ConfigError`].
//!
//! ```rust
//! use logscope::{InMemorySink, Level, Logger, Manager, config};
//! use std::sync::Arc;
//!
//! let manager = Manager::new(Logger::new(Arc::new(InMemorySink::new())));
//! manager.register("db", "database access");
//! manager.register("http", "request handling");
//!
//! config::apply_output_levels(&manager, "debug, DB:error").unwrap();
//! assert_eq!(manager.default_output_level(), Level::Debug);
//! assert_eq!(manager.output_level("db").unwrap(), Level::Error);
//! assert_eq!(manager.output_level("http").unwrap(), Level::Debug);
//!
//! let err = config::apply_output_levels(&manager, "info,nope:debug,db:loud").unwrap_err();
//! assert_eq!(err.len(), 2);
//! // the valid token still went through
//! assert_eq!(manager.output_level("http").unwrap(), Level::Info);
//! ```
//!
//! [`LogConfig`] wraps the same logic in the [`Config`] shape a process supervisor
//! drives: describe your flags, receive their values, validate before starting.

use crate::error::{ConfigError, Error};
use crate::scope::Manager;
use crate::Level;
use std::sync::Arc;

/// Flag holding the output level configuration string.
pub const LOG_OUTPUT_LEVEL: &str = "log-output-level";

/// Used when the flag is left empty.
pub const DEFAULT_LOG_OUTPUT_LEVEL: &str = "info";

/// One command-line flag a [`Config`] unit wants registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: &'static str,
    pub default: String,
    pub usage: String,
}

/// The flags of one [`Config`] unit, grouped under a heading for help output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    pub title: &'static str,
    pub flags: Vec<Flag>,
}

/**
A configurable unit of a supervised process.

The supervisor asks every unit for its flags, parses the command line, hands the
values back, and then calls [`validate`](Config::validate) on each unit. A unit
that fails validation should keep the process from starting.
*/
pub trait Config {
    fn name(&self) -> &str;

    fn flag_set(&mut self) -> FlagSet;

    fn validate(&mut self) -> Result<(), ConfigError>;
}

/// A single parsed token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Default(Level),
    Scope { name: String, level: Level },
}

fn parse_token(token: &str) -> Result<Directive, Error> {
    let parts: Vec<&str> = token.split(':').collect();
    let invalid_level = || Error::InvalidLevel(token.to_string());
    match parts.as_slice() {
        [level] => Ok(Directive::Default(
            level.parse().map_err(|_| invalid_level())?,
        )),
        [name, level] => Ok(Directive::Scope {
            name: name.to_string(),
            level: level.parse().map_err(|_| invalid_level())?,
        }),
        _ => Err(Error::MalformedToken(token.to_string())),
    }
}

/**
Applies a configuration string to `manager`.

Every token that parses and names a known scope is applied, in order, even when
others fail.
*/
pub fn apply_output_levels(manager: &Manager, output_levels: &str) -> Result<(), ConfigError> {
    let output_levels = output_levels.to_lowercase();
    let mut errors = Vec::new();
    for token in output_levels.split(',') {
        let result = parse_token(token).and_then(|directive| match directive {
            Directive::Default(level) => {
                manager.set_default_output_level(level);
                Ok(())
            }
            Directive::Scope { name, level } => manager.set_scope_output_level(&name, level),
        });
        if let Err(error) = result {
            errors.push(error);
        }
    }
    match ConfigError::from_errors(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The [`Config`] unit for a [`Manager`], exposing the `log-output-level` flag.
#[derive(Debug)]
pub struct LogConfig {
    output_levels: String,
    manager: Arc<Manager>,
}

impl LogConfig {
    pub fn new(manager: Arc<Manager>) -> Self {
        Self {
            output_levels: String::new(),
            manager,
        }
    }

    /// Binds the value the host parsed for [`LOG_OUTPUT_LEVEL`].
    pub fn set_output_levels(&mut self, output_levels: impl Into<String>) {
        self.output_levels = output_levels.into();
    }

    pub fn output_levels(&self) -> &str {
        &self.output_levels
    }

    pub fn manager(&self) -> &Arc<Manager> {
        &self.manager
    }
}

impl Config for LogConfig {
    fn name(&self) -> &str {
        "log-manager"
    }

    fn flag_set(&mut self) -> FlagSet {
        if self.output_levels.is_empty() {
            self.output_levels = DEFAULT_LOG_OUTPUT_LEVEL.to_string();
        }
        let levels: Vec<&str> = Level::ALL.iter().rev().map(|l| l.as_str()).collect();
        FlagSet {
            title: "Logging options",
            flags: vec![Flag {
                name: LOG_OUTPUT_LEVEL,
                default: self.output_levels.clone(),
                usage: format!(
                    "Comma-separated minimum per-scope logging level of messages to output, \
                     in the form of [default_level,]<scope>:<level>,<scope>:<level>,... \
                     where scope can be one of [{}] and default_level or level can be \
                     one of [{}]",
                    self.manager.scopes().join(", "),
                    levels.join(", "),
                ),
            }],
        }
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        self.output_levels = self.output_levels.to_lowercase();
        apply_output_levels(&self.manager, &self.output_levels)
    }
}
