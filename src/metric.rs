// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::context::Context;

/**
A counter-like hook bumped by [`Logger::info`](crate::Logger::info) and
[`Logger::error`](crate::Logger::error).

The hook runs on every call, including calls whose line is suppressed by the
configured level, so event frequency stays observable at any verbosity. The
logger's context is passed along for label extraction.

Closures work directly:

```rust
use logscope::{kv, InMemorySink, Logger};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

let count = Arc::new(AtomicU64::new(0));
let counter = count.clone();
let logger = Logger::new(Arc::new(InMemorySink::new()))
    .metric(Arc::new(move |_: &logscope::context::Context, n: f64| {
        counter.fetch_add(n as u64, Ordering::Relaxed);
    }));
logger.info("tick", kv![]);
assert_eq!(count.load(Ordering::Relaxed), 1);
```
*/
pub trait Metric: Send + Sync {
    fn record_context(&self, context: &Context, value: f64);
}

impl<F> Metric for F
where
    F: Fn(&Context, f64) + Send + Sync,
{
    fn record_context(&self, context: &Context, value: f64) {
        self(context, value)
    }
}
