// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkError;
use crate::record::Record;
use crate::sink::Sink;
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/**
Writes each record as one logfmt line to a [`Write`] implementation.

Calls are serialized by a mutex and each line goes out in a single `write_all`,
so lines from different threads never interleave.

```rust
use logscope::{kv, LogfmtSink, Logger};
use std::sync::Arc;

let sink = Arc::new(LogfmtSink::new(Vec::new()));
let logger = Logger::new(sink.clone());
logger.info("hello", kv![]);
let out = sink.with_writer(|buf| String::from_utf8(std::mem::take(buf)).unwrap());
assert_eq!(out, "msg=hello level=info\n");
```
*/
pub struct LogfmtSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LogfmtSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Runs `f` with exclusive access to the writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut writer)
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Debug for LogfmtSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogfmtSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for LogfmtSink<W> {
    fn log(&self, record: &Record) -> Result<(), SinkError> {
        let line = format!("{record}\n");
        self.with_writer(|writer| writer.write_all(line.as_bytes()))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.with_writer(|writer| writer.flush())?;
        Ok(())
    }
}
