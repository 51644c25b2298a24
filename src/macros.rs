// SPDX-License-Identifier: MIT OR Apache-2.0

/**
Builds a flat key/value slice.

Each expression is converted with [`Value::from`](crate::Value), so any type with a
`From` impl can appear in either position.

```rust
use logscope::{kv, Logger, InMemorySink};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let logger = Logger::new(sink.clone());
logger.info("request served", kv!["path", "/index.html", "status", 200]);
assert_eq!(sink.drain_logs(), "msg=\"request served\" level=info path=/index.html status=200");
```

Values that don't convert can be wrapped in [`Value::display`](crate::Value::display),
[`Value::debug`](crate::Value::debug) or [`Value::error`](crate::Value::error).
*/
#[macro_export]
macro_rules! kv {
    () => {
        &[] as &[$crate::Value]
    };
    ($($value:expr),+ $(,)?) => {
        &[$($crate::Value::from($value)),+] as &[$crate::Value]
    };
}
