// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.

use std::fmt::Display;

/// Errors raised by level parsing, configuration, and scope lookup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string does not name a level.
    #[error("{0:?} is not a valid log level")]
    InvalidLevel(String),

    /// A configuration token has more than one `:` separator.
    #[error("{0:?} is not a valid <scope>:<level> pair")]
    MalformedToken(String),

    /// No scope is registered under this name.
    #[error("scope {0:?} not found")]
    ScopeNotFound(String),
}

/// Failure reported by a [`Sink`](crate::Sink).
///
/// [`Logger`](crate::Logger) discards these; they only surface to code that talks
/// to a sink directly.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("failed to write log line")]
    Io(#[from] std::io::Error),
}

/**
Every error collected while applying a configuration string.

Valid tokens are still applied; this only reports the ones that were not.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    errors: Vec<Error>,
}

impl ConfigError {
    pub(crate) fn from_errors(errors: Vec<Error>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.len() == 1 {
            write!(f, "1 error occurred:")?;
        } else {
            write!(f, "{} errors occurred:", self.errors.len())?;
        }
        for error in &self.errors {
            write!(f, "\n\t* {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

impl IntoIterator for ConfigError {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigError {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_quote_the_offending_input() {
        assert_eq!(
            Error::InvalidLevel("db:loud".into()).to_string(),
            r#""db:loud" is not a valid log level"#
        );
        assert_eq!(
            Error::MalformedToken("a:b:c".into()).to_string(),
            r#""a:b:c" is not a valid <scope>:<level> pair"#
        );
        assert_eq!(
            Error::ScopeNotFound("db".into()).to_string(),
            r#"scope "db" not found"#
        );
    }

    #[test]
    fn aggregate_lists_every_error() {
        let err = ConfigError::from_errors(vec![
            Error::InvalidLevel("loud".into()),
            Error::ScopeNotFound("nope".into()),
        ])
        .unwrap();
        assert_eq!(
            err.to_string(),
            "2 errors occurred:\n\t* \"loud\" is not a valid log level\n\t* scope \"nope\" not found"
        );
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn empty_aggregate_is_no_error() {
        assert!(ConfigError::from_errors(Vec::new()).is_none());
    }
}
