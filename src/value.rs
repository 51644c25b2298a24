// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed key/value elements.
//!
//! Key/value pairs travel as a flat sequence of [`Value`]s: key, value, key, value.
//! Nothing enforces that a key is a string at the type level; [`Logger::with`](crate::Logger::with)
//! filters pairs whose key is not a [`Value::Str`], and sinks render whatever they get.
//! Use the [`kv!`](crate::kv) macro to build a sequence from ordinary Rust values.

use std::fmt::{Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// A rendered value of some other type.
    ///
    /// Never accepted as a key.
    Text(String),
}

impl Value {
    /// Captures an error by its `Display` output.
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Value::Text(err.to_string())
    }

    pub fn display(value: impl Display) -> Self {
        Value::Text(value.to_string())
    }

    pub fn debug(value: impl Debug) -> Self {
        Value::Text(format!("{value:?}"))
    }

    /// The string, if this value can act as a key.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) | Value::Text(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<crate::Level> for Value {
    fn from(value: crate::Level) -> Self {
        Value::Str(value.as_str().to_string())
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(value as i64)
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Uint(value as u64)
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

/*
Boilerplate notes.

Value:
- Clone/Debug/PartialEq derived; Eq and Hash are out because of f64.
- Default makes no sense, there is no obvious zero value for "some key or value".
- Display renders the raw value; quoting is the sink's business.
- From for the primitive types, but deliberately not for `&dyn Error`, which
  would overlap with `&str` under coherence rules. Use Value::error instead.
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strings_are_keys() {
        assert_eq!(Value::from("k").as_key(), Some("k"));
        assert_eq!(Value::from(3).as_key(), None);
        assert_eq!(Value::display("k").as_key(), None);
    }

    #[test]
    fn integers_keep_sign() {
        assert_eq!(Value::from(-3i32), Value::Int(-3));
        assert_eq!(Value::from(3usize), Value::Uint(3));
        assert_eq!(Value::from(-3i32).to_string(), "-3");
    }

    #[test]
    fn errors_render_their_message() {
        let err = std::io::Error::other("disk on fire");
        assert_eq!(Value::error(&err).to_string(), "disk on fire");
    }
}
