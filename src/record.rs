// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`Record`] is the ordered key/value sequence a [`Logger`](crate::Logger) hands to
//! its [`Sink`](crate::Sink). The logger assembles it in a fixed order:
//!
//! 1. `msg` and `level`
//! 2. `error` (error lines only)
//! 3. the pairs of the attached [`Context`](crate::context::Context)
//! 4. the logger's own fields, accumulated through [`Logger::with`](crate::Logger::with)
//! 5. the pairs passed at the call site
//!
//! Duplicate keys are kept. Deciding which one wins is left to whoever reads the output.
//!
//! # Encoding
//!
//! `Display` renders the record as a single [logfmt](https://brandur.org/logfmt) line
//! without the trailing newline:
//!
//! ```rust
//! use logscope::{kv, Level, Record};
//!
//! let mut record = Record::new(Level::Info);
//! record.extend(kv!["msg", "hello world", "level", "info", "n", 3]);
//! assert_eq!(record.to_string(), r#"msg="hello world" level=info n=3"#);
//! ```
//!
//! An odd trailing key is paired with `(MISSING)`. Characters that would break the
//! line apart are stripped from keys and force quoting in values.

use crate::{Level, Value};
use std::fmt::{Display, Write};

/// Paired with a trailing key that has no value.
pub const MISSING_VALUE: &str = "(MISSING)";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    key_values: Vec<Value>,
    level: Option<Level>,
}

impl Record {
    /// An empty record produced at `level`.
    pub fn new(level: Level) -> Self {
        Self {
            key_values: Vec::new(),
            level: Some(level),
        }
    }

    /// A record not produced by a level-gated call, e.g. one written through
    /// [`Logger::sink`](crate::Logger::sink) directly.
    pub fn raw(key_values: &[Value]) -> Self {
        Self {
            key_values: key_values.to_vec(),
            level: None,
        }
    }

    pub(crate) fn with_capacity(level: Level, capacity: usize) -> Self {
        Self {
            key_values: Vec::with_capacity(capacity),
            level: Some(level),
        }
    }

    pub fn push(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        self.key_values.push(key.into());
        self.key_values.push(value.into());
    }

    /// Appends a flat sequence as given, odd length included.
    pub fn extend(&mut self, key_values: &[Value]) {
        self.key_values.extend_from_slice(key_values);
    }

    pub fn key_values(&self) -> &[Value] {
        &self.key_values
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for pair in self.key_values.chunks(2) {
            let key = sanitize_key(&pair[0]);
            if key.is_empty() {
                continue;
            }
            if !first {
                f.write_char(' ')?;
            }
            first = false;
            f.write_str(&key)?;
            f.write_char('=')?;
            match pair.get(1) {
                Some(value) => write_value(f, &value.to_string())?,
                None => f.write_str(MISSING_VALUE)?,
            }
        }
        Ok(())
    }
}

fn breaks_token(c: char) -> bool {
    c <= ' ' || c == '=' || c == '"' || c == char::REPLACEMENT_CHARACTER
}

fn sanitize_key(key: &Value) -> String {
    key.to_string().chars().filter(|c| !breaks_token(*c)).collect()
}

fn write_value(f: &mut std::fmt::Formatter<'_>, value: &str) -> std::fmt::Result {
    // an unquoted null would read back as a missing value
    if value != "null" && !value.chars().any(breaks_token) {
        return f.write_str(value);
    }
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/*
Boilerplate notes for Record:

- Clone/Debug/PartialEq/Default derived; Default is the empty raw record.
- No Eq/Hash since Value carries floats.
- Display is the wire format, so there is exactly one encoding and sinks share it.
*/
