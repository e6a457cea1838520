//! Appending a timestamped entry to a log sink on every call.
//!
//! The sink is any append-only [`Write`] destination: a file opened in
//! append mode, a stream, or an in-memory buffer. It is probed when the
//! logger is built by writing a `created at:` entry, so an unwritable sink is
//! reported immediately as a [`SinkError`] instead of on the first call.
//! Every call then appends a `called at:` entry before delegating.

use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;

use crate::callable::Callable;
use crate::error::SinkError;

const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Settings fixed when a logger is attached.
///
/// # Examples
///
/// ```rust
/// use fnops::decorate::LoggerConfig;
///
/// let config = LoggerConfig::default()
///     .label("download")
///     .timestamp_format("%H:%M:%S");
/// assert_eq!(config.entry("called", "12:00:00"), "download called at: 12:00:00\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    label: Option<String>,
    timestamp_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            label: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Prefixes every entry with `label`.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the `chrono` format string used for timestamps.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Formats one log line for `event` at `timestamp`.
    pub fn entry(&self, event: &str, timestamp: &str) -> String {
        match &self.label {
            Some(label) => format!("{label} {event} at: {timestamp}\n"),
            None => format!("{event} at: {timestamp}\n"),
        }
    }

    /// Attaches a logger writing to the file at `path`, opened for appending
    /// and created if missing.
    ///
    /// # Errors
    ///
    /// [`SinkError::Open`] if the file cannot be opened,
    /// [`SinkError::Unwritable`] if the first entry cannot be written.
    pub fn attach_file<F>(self, inner: F, path: impl AsRef<Path>) -> Result<Logged<F>, SinkError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "attaching file logger");
        self.attach_writer(inner, file)
    }

    /// Attaches a logger writing to `writer`.
    ///
    /// # Errors
    ///
    /// [`SinkError::Unwritable`] if the first entry cannot be written.
    pub fn attach_writer<F, W>(self, inner: F, writer: W) -> Result<Logged<F>, SinkError>
    where
        W: Write + Send + 'static,
    {
        let mut sink: Box<dyn Write + Send> = Box::new(writer);
        let created = self.entry("created", &self.now());
        sink.write_all(created.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(SinkError::Unwritable)?;
        Ok(Logged {
            inner,
            sink: Mutex::new(sink),
            config: self,
        })
    }

    fn now(&self) -> String {
        let now = Local::now();
        let mut stamp = String::new();
        if write!(stamp, "{}", now.format(&self.timestamp_format)).is_err() {
            stamp = now.to_rfc3339();
        }
        stamp
    }
}

/// Callable that appends a timestamped entry to its sink, then delegates.
///
/// Entries from concurrent callers never interleave within a line: the sink
/// is locked for the duration of one append.
pub struct Logged<F> {
    inner: F,
    sink: Mutex<Box<dyn Write + Send>>,
    config: LoggerConfig,
}

impl<F> Logged<F> {
    /// The configuration this logger was attached with.
    pub const fn config(&self) -> &LoggerConfig {
        &self.config
    }

    fn append(&self, event: &str) {
        let entry = self.config.entry(event, &self.config.now());
        let mut sink = self.sink.lock();
        if let Err(error) = sink.write_all(entry.as_bytes()).and_then(|()| sink.flush()) {
            tracing::warn!(%error, "log sink rejected an entry");
        }
    }
}

impl<F> fmt::Debug for Logged<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logged")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A, F: Callable<A>> Callable<A> for Logged<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<F::Output, F::Error> {
        self.append("called");
        self.inner.invoke(input)
    }
}

/// Logs every call to `inner` into the file at `path`.
///
/// # Errors
///
/// Fails at wrap time when the file cannot be opened or written.
pub fn log_to<F>(inner: F, path: impl AsRef<Path>) -> Result<Logged<F>, SinkError> {
    LoggerConfig::default().attach_file(inner, path)
}

/// Logs every call to `inner` into `writer`.
///
/// # Errors
///
/// Fails at wrap time when `writer` rejects the first entry.
pub fn log_to_writer<F, W>(inner: F, writer: W) -> Result<Logged<F>, SinkError>
where
    W: Write + Send + 'static,
{
    LoggerConfig::default().attach_writer(inner, writer)
}
