// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ambient key/value context.
//!
//! A [`Context`] carries key/value pairs that belong to a unit of work rather than
//! to a particular logger: a request id, a tenant, a trace id. Attach one to a
//! logger with [`Logger::context`](crate::Logger::context) and every emitted line
//! includes its pairs ahead of the logger's own fields. The same context is handed
//! to [`Metric`](crate::Metric) hooks so they can derive labels from it.
//!
//! Contexts are immutable and cheap to clone. Adding values produces a new context,
//! leaving the original untouched:
//!
//! ```rust
//! use logscope::{kv, context::Context};
//!
//! let request = Context::background().with_values(kv!["request", 7]);
//! let user = request.with_values(kv!["user", "alice"]);
//! assert_eq!(request.key_values().len(), 2);
//! assert_eq!(user.key_values().len(), 4);
//! ```

use crate::Value;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
struct ContextInner {
    key_values: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

static BACKGROUND: OnceLock<Context> = OnceLock::new();

impl Context {
    /// The empty root context.
    pub fn background() -> Context {
        BACKGROUND
            .get_or_init(|| Context {
                inner: Arc::new(ContextInner {
                    key_values: Vec::new(),
                }),
            })
            .clone()
    }

    /**
    Returns a child context holding this context's pairs followed by `key_values`.

    Returns `self` when `key_values` is empty.
    */
    pub fn with_values(&self, key_values: &[Value]) -> Context {
        if key_values.is_empty() {
            return self.clone();
        }
        let mut merged = Vec::with_capacity(self.inner.key_values.len() + key_values.len());
        merged.extend_from_slice(&self.inner.key_values);
        merged.extend_from_slice(key_values);
        Context {
            inner: Arc::new(ContextInner { key_values: merged }),
        }
    }

    /// The flat key/value sequence carried by this context.
    pub fn key_values(&self) -> &[Value] {
        &self.inner.key_values
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::background()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn background_is_shared_and_empty() {
        assert_eq!(Context::background(), Context::background());
        assert!(Context::background().key_values().is_empty());
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn with_values_appends_without_touching_parent() {
        let parent = Context::background().with_values(kv!["a", 1]);
        let child = parent.with_values(kv!["b", 2]);
        assert_eq!(parent.key_values(), kv!["a", 1]);
        assert_eq!(child.key_values(), kv!["a", 1, "b", 2]);
        assert_ne!(parent, child);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn empty_with_values_is_identity() {
        let ctx = Context::background().with_values(kv!["a", 1]);
        assert_eq!(ctx.with_values(kv![]), ctx);
    }
}
