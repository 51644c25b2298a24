// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output levels.
//!
//! Levels are ordered from most restrictive to most verbose. A logger configured
//! at some level emits every message whose level is less than or equal to it, so
//! [`Level::None`] silences everything and [`Level::Debug`] lets everything through.

use crate::error::Error;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i32)]
pub enum Level {
    /// Nothing is emitted.
    None = 0,
    /// Application state or stability is at risk.
    Error = 1,
    /// Informational, not directly actionable.
    #[default]
    Info = 2,
    /// Everything, including debugging detail.
    Debug = 3,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 4] = [Level::None, Level::Error, Level::Info, Level::Debug];

    /// The canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Error => "error",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    /// The ordinal stored in a logger's level cell.
    pub const fn value(self) -> i32 {
        self as i32
    }

    /**
    Normalizes an arbitrary ordinal into a level.

    Values at or below zero mean [`Level::None`], values at or above the debug
    ordinal mean [`Level::Debug`].
    */
    pub const fn from_value(value: i32) -> Level {
        if value <= Level::None as i32 {
            Level::None
        } else if value < Level::Info as i32 {
            Level::Error
        } else if value < Level::Debug as i32 {
            Level::Info
        } else {
            Level::Debug
        }
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level::from_value(value)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace and control characters are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c.is_control());
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}
