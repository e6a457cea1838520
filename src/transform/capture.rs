use std::fmt;
use std::marker::PhantomData;

use crate::callable::Callable;

/// Side-channel text written by a function during one call.
///
/// Functions wrapped by [`capture_output`] receive a fresh, empty transcript
/// per call and write diagnostics to it instead of a global stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    /// An empty transcript.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Appends `line` followed by a newline.
    pub fn emit(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the transcript, returning its text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Write for Transcript {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.text.push_str(text);
        Ok(())
    }
}

/// Callable returning what its inner function wrote to a [`Transcript`],
/// discarding the function's own return value.
///
/// A failing call propagates its failure and its transcript is dropped.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::transform::{Transcript, capture_output};
/// use std::fmt::Write;
///
/// let summary = capture_output(|values: Vec<f64>, out: &mut Transcript| {
///     let mean = values.iter().sum::<f64>() / values.len() as f64;
///     writeln!(out, "n = {}", values.len()).map_err(|_| "transcript closed")?;
///     out.emit(format!("mean = {mean}"));
///     Ok::<_, &str>(mean)
/// });
///
/// assert_eq!(summary.invoke(vec![1.0, 2.0, 3.0]), Ok("n = 3\nmean = 2\n".to_string()));
/// ```
pub struct Captured<F, B, E> {
    inner: F,
    signature: PhantomData<fn() -> Result<B, E>>,
}

impl<F: Clone, B, E> Clone for Captured<F, B, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            signature: PhantomData,
        }
    }
}

impl<F, B, E> fmt::Debug for Captured<F, B, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Captured").finish_non_exhaustive()
    }
}

impl<A, B, E, F> Callable<A> for Captured<F, B, E>
where
    F: Fn(A, &mut Transcript) -> Result<B, E>,
{
    type Output = String;
    type Error = E;

    fn invoke(&self, input: A) -> Result<String, E> {
        let mut transcript = Transcript::new();
        (self.inner)(input, &mut transcript)?;
        Ok(transcript.into_string())
    }
}

/// Wraps `inner` so each call returns the text it wrote instead of its value.
pub const fn capture_output<F, A, B, E>(inner: F) -> Captured<F, B, E>
where
    F: Fn(A, &mut Transcript) -> Result<B, E>,
{
    Captured {
        inner,
        signature: PhantomData,
    }
}
