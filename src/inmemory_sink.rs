// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! A sink that keeps encoded lines in memory instead of writing them anywhere,
//! for tests and for programmatically inspecting what a logger emitted.
//!
//! ```rust
//! use logscope::{kv, InMemorySink, Logger, Level};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let logger = Logger::new(sink.clone());
//! logger.info("first", kv![]);
//! logger.debug("suppressed at info", kv![]);
//! logger.set_level(Level::Debug);
//! logger.debug("second", kv!["n", 2]);
//!
//! assert_eq!(
//!     sink.drain_logs(),
//!     "msg=first level=info\nmsg=second level=debug n=2"
//! );
//! assert!(sink.is_empty());
//! ```

use crate::error::SinkError;
use crate::record::Record;
use crate::sink::Sink;
use std::sync::{Mutex, PoisonError};

/// Stores each record's logfmt line in a `Vec<String>`.
///
/// Thread-safe; share it through `Arc` between the logger and the code inspecting it.
#[derive(Debug)]
pub struct InMemorySink {
    lines: Mutex<Vec<String>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug: derived, required by Sink
// - Default: empty buffer
// - Clone: NOT implemented, two buffers sharing a history would be confusing
// - PartialEq/Eq/Hash: NOT implemented, comparing mutex contents is racy

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Joins every captured line with `\n` and clears the buffer.
    pub fn drain_logs(&self) -> String {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let result = lines.join("\n");
        lines.clear();
        result
    }

    /// Takes every captured line, clearing the buffer.
    pub fn drain_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for InMemorySink {
    fn log(&self, record: &Record) -> Result<(), SinkError> {
        let line = record.to_string();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}
