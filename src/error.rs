//! Error types shared by the combinators.
//!
//! Generic combinators never invent errors of their own: they pass the inner
//! callable's error type through unchanged. The types here cover the two
//! places where the library itself can fail:
//!
//! - [`CallError`]: failures of dynamically-typed callables that take
//!   [`Arguments`](crate::callable::Arguments) (missing or malformed
//!   arguments, unknown registry names, user-reported failures).
//! - [`SinkError`]: a log sink that cannot be written, reported when the
//!   logger is constructed rather than on first call.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a dynamically-typed callable.
///
/// # Examples
///
/// ```rust
/// use fnops::error::CallError;
///
/// let error = CallError::MissingNamed("scale".to_string());
/// assert_eq!(format!("{error}"), "missing named argument `scale`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// No positional argument at the requested index.
    #[error("missing positional argument at index {0}")]
    MissingPositional(usize),

    /// No named argument with the requested name.
    #[error("missing named argument `{0}`")]
    MissingNamed(String),

    /// An argument is present but could not be converted to the requested type.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Index or name of the offending argument.
        argument: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// A registry lookup named a callable that was never registered.
    #[error("no callable registered under `{0}`")]
    UnknownCallable(String),

    /// The callable itself reported a failure.
    #[error("{0}")]
    Failed(String),
}

impl CallError {
    /// Convenience constructor for [`CallError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A log sink rejected at wrap time.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink file could not be opened for appending.
    #[error("cannot open log sink {}: {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The sink accepted no writes.
    #[error("log sink is not writable: {0}")]
    Unwritable(#[source] std::io::Error),
}
