//! Keeping an ordered history of calls.

use std::fmt;

use parking_lot::Mutex;

use crate::callable::Callable;

/// Snapshot of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord<A, B> {
    /// Position in the history, starting at `0`.
    pub sequence: usize,
    /// The input as received.
    pub input: A,
    /// The output, or `None` when the call failed.
    pub output: Option<B>,
}

impl<A, B> CallRecord<A, B> {
    /// Whether the recorded call failed.
    pub const fn failed(&self) -> bool {
        self.output.is_none()
    }
}

/// Callable that appends a [`CallRecord`] per invocation to a private
/// history, then returns the inner result unchanged.
///
/// Records are appended once the inner call completes. For calls made one
/// after another the history matches call order; for concurrent calls it
/// matches completion order.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::decorate::record;
///
/// let recorded = record(|value: u32| value.checked_sub(1).ok_or("underflow"));
/// assert_eq!(recorded.invoke(5), Ok(4));
/// assert_eq!(recorded.invoke(0), Err("underflow"));
///
/// let history = recorded.history();
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[0].output, Some(4));
/// assert!(history[1].failed());
/// assert_eq!(recorded.inputs(), vec![5, 0]);
/// ```
pub struct Recorded<F, A, B> {
    inner: F,
    history: Mutex<Vec<CallRecord<A, B>>>,
}

impl<F, A, B> Recorded<F, A, B> {
    /// Wraps `inner` with an empty history.
    pub const fn new(inner: F) -> Self {
        Self {
            inner,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }
}

impl<F, A: Clone, B: Clone> Recorded<F, A, B> {
    /// Copy of the full history.
    pub fn history(&self) -> Vec<CallRecord<A, B>> {
        self.history.lock().clone()
    }

    /// Recorded inputs in history order.
    pub fn inputs(&self) -> Vec<A> {
        self.history
            .lock()
            .iter()
            .map(|record| record.input.clone())
            .collect()
    }

    /// Recorded successful outputs in history order.
    pub fn outputs(&self) -> Vec<B> {
        self.history
            .lock()
            .iter()
            .filter_map(|record| record.output.clone())
            .collect()
    }
}

impl<F, A: fmt::Debug, B: fmt::Debug> fmt::Debug for Recorded<F, A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Recorded")
            .field("history", &*self.history.lock())
            .finish_non_exhaustive()
    }
}

impl<F, A, B> Callable<A> for Recorded<F, A, B>
where
    F: Callable<A, Output = B>,
    A: Clone,
    B: Clone,
{
    type Output = B;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<B, F::Error> {
        let snapshot = input.clone();
        let result = self.inner.invoke(input);
        let mut history = self.history.lock();
        let sequence = history.len();
        history.push(CallRecord {
            sequence,
            input: snapshot,
            output: result.as_ref().ok().cloned(),
        });
        result
    }
}

/// Wraps `inner` so every call is recorded.
pub const fn record<F, A, B>(inner: F) -> Recorded<F, A, B> {
    Recorded::new(inner)
}
