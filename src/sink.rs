// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkError;
use crate::record::Record;
use std::fmt::Debug;

/**
The emission target behind a [`Logger`](crate::Logger).

One sink is typically shared by every logger derived from a root, including the
loggers handed out by a [`Manager`](crate::Manager), so implementations must
serialize concurrent calls themselves.
*/
pub trait Sink: Debug + Send + Sync {
    /**
    Writes the record.

    Errors are reported but [`Logger`](crate::Logger) ignores them; logging never
    fails the caller.
    */
    fn log(&self, record: &Record) -> Result<(), SinkError>;

    /**
    The application may imminently exit.  Ensure all buffers are flushed.
    */
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/*
Boilerplate notes.

# Sink

Clone is left to implementations; sinks are shared through Arc anyway.
PartialEq/Eq/Hash would raise the data-vs-provenance question again, so no.
Default is not sensible, who knows what a sink writes to.
Send/Sync are required since one sink serves loggers on every thread.
*/
