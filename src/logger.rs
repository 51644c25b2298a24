// SPDX-License-Identifier: MIT OR Apache-2.0

//! The level-gated logger.
//!
//! A [`Logger`] pairs a [`Sink`] with everything needed to decide whether a call
//! produces a line and what goes into it: an output level, a [`Context`], fields
//! accumulated through [`Logger::with`], and an optional [`Metric`].
//!
//! # Level sharing
//!
//! The level lives in a shared atomic cell. Loggers derived through
//! [`Logger::with`], [`Logger::context`], [`Logger::metric`] (and `Clone`) point at
//! the same cell as their parent, so changing the level on any of them changes it
//! for all:
//!
//! ```rust
//! use logscope::{kv, InMemorySink, Level, Logger};
//! use std::sync::Arc;
//!
//! let root = Logger::new(Arc::new(InMemorySink::new()));
//! let child = root.with(kv!["component", "db"]);
//! root.set_level(Level::Debug);
//! assert_eq!(child.level(), Level::Debug);
//!
//! // an independent copy starts at the current level and then goes its own way
//! let quiet = root.with_independent_level();
//! quiet.set_level(Level::Error);
//! assert_eq!(root.level(), Level::Debug);
//! ```
//!
//! Everything else on a logger is fixed at construction, which is why loggers can be
//! shared between threads and derived freely without locking.

use crate::context::Context;
use crate::logfmt_sink::LogfmtSink;
use crate::metric::Metric;
use crate::record::{MISSING_VALUE, Record};
use crate::sink::Sink;
use crate::{Level, Value};
use std::fmt::Debug;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Clone)]
pub struct Logger {
    context: Context,
    fields: Arc<[Value]>,
    metric: Option<Arc<dyn Metric>>,
    level: Arc<AtomicI32>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// A logger at [`Level::Info`] with an empty context, no fields and no metric.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            context: Context::background(),
            fields: Vec::new().into(),
            metric: None,
            level: Arc::new(AtomicI32::new(Level::Info.value())),
            sink,
        }
    }

    /// A logger writing synchronized logfmt lines to `writer`.
    pub fn logfmt<W: Write + Send + 'static>(writer: W) -> Self {
        Self::new(Arc::new(LogfmtSink::new(writer)))
    }

    /// A fresh logger on this logger's sink: empty context, no fields, no metric,
    /// and an independent level cell seeded with the current level.
    pub(crate) fn detached(&self) -> Self {
        Self {
            context: Context::background(),
            fields: Vec::new().into(),
            metric: None,
            level: Arc::new(AtomicI32::new(self.level.load(Ordering::Relaxed))),
            sink: self.sink.clone(),
        }
    }

    /// The sink this logger writes to.
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Debug logging with key-value pairs.
    pub fn debug(&self, msg: &str, key_values: &[Value]) {
        if !self.enabled(Level::Debug) {
            return;
        }
        self.emit(Level::Debug, msg, None, key_values);
    }

    /**
    Logs an informational, not directly actionable, condition.

    The attached metric, if any, is recorded even when the level suppresses the
    line. A single informational line rarely calls for action; a change in how often
    it occurs often does.
    */
    pub fn info(&self, msg: &str, key_values: &[Value]) {
        self.record_metric();
        if !self.enabled(Level::Info) {
            return;
        }
        self.emit(Level::Info, msg, None, key_values);
    }

    /**
    Logs a condition that puts application state or stability at risk.

    The attached metric, if any, is recorded even when the level suppresses the line.
    */
    pub fn error(&self, msg: &str, err: &(dyn std::error::Error + '_), key_values: &[Value]) {
        self.record_metric();
        if !self.enabled(Level::Error) {
            return;
        }
        self.emit(Level::Error, msg, Some(err), key_values);
    }

    /// Whether a message at `level` would currently be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::None && self.level.load(Ordering::Relaxed) >= level.value()
    }

    fn record_metric(&self) {
        if let Some(metric) = &self.metric {
            metric.record_context(&self.context, 1.0);
        }
    }

    fn emit(
        &self,
        level: Level,
        msg: &str,
        err: Option<&(dyn std::error::Error + '_)>,
        key_values: &[Value],
    ) {
        let context = self.context.key_values();
        let mut record = Record::with_capacity(
            level,
            6 + context.len() + self.fields.len() + key_values.len(),
        );
        record.push("msg", msg);
        record.push("level", level);
        if let Some(err) = err {
            record.push("error", Value::error(err));
        }
        record.extend(context);
        record.extend(&self.fields);
        record.extend(key_values);
        let _ = self.sink.log(&record);
    }

    /**
    Returns a logger with `key_values` appended to its fields.

    Returns a clone of `self` when `key_values` is empty. An odd trailing key is
    paired with `(MISSING)`. Pairs whose key is not a string are dropped.
    */
    pub fn with(&self, key_values: &[Value]) -> Logger {
        if key_values.is_empty() {
            return self.clone();
        }
        let mut fields = Vec::with_capacity(self.fields.len() + key_values.len() + 1);
        fields.extend_from_slice(&self.fields);
        for pair in key_values.chunks(2) {
            if pair[0].as_key().is_none() {
                continue;
            }
            fields.push(pair[0].clone());
            fields.push(
                pair.get(1)
                    .cloned()
                    .unwrap_or_else(|| Value::from(MISSING_VALUE)),
            );
        }
        Logger {
            fields: fields.into(),
            ..self.clone()
        }
    }

    /// Returns a logger whose lines and metrics draw on `context`.
    pub fn context(&self, context: Context) -> Logger {
        Logger {
            context,
            ..self.clone()
        }
    }

    /// Returns a logger that records `metric` on each info and error call.
    pub fn metric(&self, metric: Arc<dyn Metric>) -> Logger {
        Logger {
            metric: Some(metric),
            ..self.clone()
        }
    }

    /**
    Returns a copy whose level can change without affecting this logger or anything
    sharing its level.

    The copy starts at this logger's current level.
    */
    pub fn with_independent_level(&self) -> Logger {
        Logger {
            level: Arc::new(AtomicI32::new(self.level.load(Ordering::Relaxed))),
            ..self.clone()
        }
    }

    /// Sets the output level for this logger and every logger sharing its level.
    ///
    /// Safe to call at runtime from any thread.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_value(self.level.load(Ordering::Relaxed))
    }

    /// Whether `self` and `other` read and write the same level.
    pub fn shares_level_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.level, &other.level)
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn current_context(&self) -> &Context {
        &self.context
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("fields", &self.fields)
            .field("context", &self.context)
            .field("metric", &self.metric.is_some())
            .field("sink", &self.sink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemorySink;
    use crate::kv;
    use std::sync::atomic::AtomicUsize;

    fn logger() -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        (Logger::new(sink.clone()), sink)
    }

    fn counting_metric() -> (Arc<dyn Metric>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let metric: Arc<dyn Metric> = Arc::new(move |_: &Context, n: f64| {
            counter.fetch_add(n as usize, Ordering::Relaxed);
        });
        (metric, count)
    }

    #[test]
    fn defaults_to_info() {
        let (logger, sink) = logger();
        assert_eq!(logger.level(), Level::Info);
        logger.debug("hidden", kv![]);
        logger.info("shown", kv![]);
        assert_eq!(sink.drain_logs(), "msg=shown level=info");
    }

    #[test]
    fn suppression_follows_the_level_order() {
        let (logger, sink) = logger();
        for configured in Level::ALL {
            logger.set_level(configured);
            logger.error("e", &std::io::Error::other("x"), kv![]);
            logger.info("i", kv![]);
            logger.debug("d", kv![]);
            let emitted = sink.drain_lines();
            let expected = Level::ALL[1..]
                .iter()
                .filter(|l| **l <= configured)
                .count();
            assert_eq!(emitted.len(), expected, "configured at {configured}");
        }
    }

    #[test]
    fn none_silences_everything() {
        let (logger, sink) = logger();
        logger.set_level(Level::None);
        assert!(!logger.enabled(Level::Error));
        assert!(!logger.enabled(Level::None));
        logger.error("e", &std::io::Error::other("x"), kv![]);
        assert!(sink.is_empty());
    }

    #[test]
    fn metric_counts_suppressed_calls() {
        let (logger, sink) = logger();
        let (metric, count) = counting_metric();
        let logger = logger.metric(metric);
        logger.set_level(Level::None);
        logger.info("a", kv![]);
        logger.error("b", &std::io::Error::other("x"), kv![]);
        logger.debug("c", kv![]);
        assert_eq!(count.load(Ordering::Relaxed), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn metric_sees_the_attached_context() {
        let (logger, _sink) = logger();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let ctx = Context::background().with_values(kv!["tenant", "acme"]);
        let logger = logger
            .context(ctx.clone())
            .metric(Arc::new(move |c: &Context, _: f64| {
                recorder.lock().unwrap().push(c.clone());
            }));
        logger.info("a", kv![]);
        assert_eq!(seen.lock().unwrap().as_slice(), &[ctx]);
    }

    #[test]
    fn argument_order_is_fixed() {
        let (logger, sink) = logger();
        let ctx = Context::background().with_values(kv!["ctx", 1]);
        let logger = logger.with(kv!["field", 2]).context(ctx);
        logger.error("boom", &std::io::Error::other("bad"), kv!["call", 3]);
        assert_eq!(
            sink.drain_logs(),
            "msg=boom level=error error=bad ctx=1 field=2 call=3"
        );
    }

    #[test]
    fn with_nothing_is_the_same_logger() {
        let (logger, _sink) = logger();
        let same = logger.with(kv![]);
        assert!(same.shares_level_with(&logger));
        assert!(same.fields().is_empty());
    }

    #[test]
    fn with_drops_non_string_keys() {
        let (logger, _sink) = logger();
        let derived = logger.with(kv![1, "one", "two", 2, Value::display("x"), 3]);
        assert_eq!(derived.fields(), kv!["two", 2]);
    }

    #[test]
    fn with_pads_odd_input() {
        let (logger, _sink) = logger();
        let derived = logger.with(kv!["a", 1, "key"]);
        assert_eq!(derived.fields(), kv!["a", 1, "key", "(MISSING)"]);
    }

    #[test]
    fn with_does_not_touch_the_parent() {
        let (logger, _sink) = logger();
        let parent = logger.with(kv!["a", 1]);
        let child = parent.with(kv!["b", 2]);
        assert_eq!(parent.fields(), kv!["a", 1]);
        assert_eq!(child.fields(), kv!["a", 1, "b", 2]);
    }

    #[test]
    fn derivations_share_the_level() {
        let (logger, _sink) = logger();
        let (metric, _) = counting_metric();
        let derived = [
            logger.with(kv!["a", 1]),
            logger.context(Context::background().with_values(kv!["c", 1])),
            logger.metric(metric),
            logger.clone(),
        ];
        logger.set_level(Level::Debug);
        for d in &derived {
            assert!(d.shares_level_with(&logger));
            assert_eq!(d.level(), Level::Debug);
        }
    }

    #[test]
    fn independent_level_is_seeded_then_decoupled() {
        let (logger, sink) = logger();
        let logger = logger.with(kv!["a", 1]);
        logger.set_level(Level::Debug);
        let independent = logger.with_independent_level();
        assert!(!independent.shares_level_with(&logger));
        assert_eq!(independent.level(), Level::Debug);
        assert_eq!(independent.fields(), logger.fields());

        independent.set_level(Level::Error);
        assert_eq!(logger.level(), Level::Debug);
        independent.debug("silence", kv![]);
        assert!(sink.is_empty());
    }

    #[test]
    fn sink_failures_are_swallowed() {
        #[derive(Debug)]
        struct Failing;
        impl Sink for Failing {
            fn log(&self, _record: &Record) -> Result<(), crate::SinkError> {
                Err(std::io::Error::other("nope").into())
            }
        }
        let logger = Logger::new(Arc::new(Failing));
        logger.info("still fine", kv![]);
    }

    #[test]
    fn level_changes_are_seen_across_threads() {
        let (logger, sink) = logger();
        let other = logger.with(kv!["thread", "b"]);
        std::thread::spawn(move || other.set_level(Level::Error))
            .join()
            .expect("thread panicked");
        logger.info("hidden", kv![]);
        assert!(sink.is_empty());
    }
}
