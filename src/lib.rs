//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# logscope

logscope is a small logging facade with per-subsystem output levels.

# The problem

A process made of many subsystems usually wants one place for its log lines but not
one verbosity. When the database layer misbehaves you want its debug output, without
drowning in debug output from everything else. And you want to turn that on at
runtime, from a flag, without restarting each component with a new logger.

# The facade

A [`Logger`] decides, per call, whether a line is emitted and which key/value pairs
go into it. There are three levels of message, and a logger configured at some
[`Level`] emits everything at or below it:

| Level   | Use it for                                          |
|---------|-----------------------------------------------------|
| `error` | application state or stability is at risk           |
| `info`  | informational, not directly actionable              |
| `debug` | everything else. Don't be shy                       |
| `none`  | (configuration only) emit nothing                   |

```rust
use logscope::{kv, Logger, Level};

let logger = Logger::logfmt(std::io::stderr());
logger.info("listening", kv!["port", 8080]);
logger.debug("not shown at the default level", kv![]);
```

Lines are handed to a [`Sink`] as an ordered key/value [`Record`]. The provided sinks
encode them as logfmt: `msg=listening level=info port=8080`.

Loggers are immutable apart from their level. [`Logger::with`], [`Logger::context`] and
[`Logger::metric`] derive new loggers that share the parent's level, so a level change
reaches every logger derived from the same place.
[`Logger::with_independent_level`] breaks that link.

# Scopes

A [`Manager`] registers named scopes, each with its own logger and level, all writing
to the root logger's sink:

```rust
use logscope::{kv, InMemorySink, Level, Logger, Manager};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let manager = Manager::new(Logger::new(sink.clone()));
let db = manager.register("db", "database access");

manager.set_scope_output_level("db", Level::Debug).unwrap();
db.debug("connected", kv![]);
assert_eq!(sink.drain_logs(), "msg=connected level=debug");
```

# Configuration

[`config`] parses strings like `info,db:debug,http:error` into manager calls, and
wraps that as a [`config::Config`] unit for process supervisors.

# Multithreading

Everything here is `Send + Sync`. Levels are atomics read on every call without
locking; the scope registry takes a mutex only around map access.
*/

mod error;
mod inmemory_sink;
mod level;
mod logfmt_sink;
mod logger;
mod macros;
mod metric;
mod record;
mod scope;
mod sink;
mod stderr_sink;
mod value;

pub mod config;
pub mod context;

pub use error::{ConfigError, Error, SinkError};
pub use inmemory_sink::InMemorySink;
pub use level::Level;
pub use logfmt_sink::LogfmtSink;
pub use logger::Logger;
pub use metric::Metric;
pub use record::{MISSING_VALUE, Record};
pub use scope::Manager;
pub use sink::Sink;
pub use stderr_sink::StdErrSink;
pub use value::Value;
