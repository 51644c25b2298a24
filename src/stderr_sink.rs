// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkError;
use crate::record::Record;
use crate::sink::Sink;

/**
A reference sink that writes logfmt lines to stderr.

On `wasm32` lines go to the browser console instead, picking the console method
that matches the record's level.
 */
#[derive(Debug, Clone)]
pub struct StdErrSink {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone: derived, zero-sized
// - Copy: implemented, nothing to duplicate
// - PartialEq/Eq/Hash: all instances write to the same place, so all are equal
// - Default: the zero-argument constructor

impl Copy for StdErrSink {}

impl PartialEq for StdErrSink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for StdErrSink {}

impl std::hash::Hash for StdErrSink {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {}
}

impl Default for StdErrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StdErrSink {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Sink for StdErrSink {
    fn log(&self, record: &Record) -> Result<(), SinkError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let line = format!("{record}\n");
            std::io::stderr().lock().write_all(line.as_bytes())?;
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Level;
            let line = record.to_string();
            match record.level() {
                Some(Level::Error) => web_sys::console::error_1(&line.into()),
                Some(Level::Info) => web_sys::console::info_1(&line.into()),
                Some(Level::Debug) => web_sys::console::debug_1(&line.into()),
                Some(Level::None) | None => web_sys::console::log_1(&line.into()),
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            std::io::stderr().flush()?;
        }
        Ok(())
    }
}
