//! Counting invocations and notifying periodically.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::callable::Callable;

/// Callable that counts its invocations and fires a notifier every
/// `interval` calls.
///
/// The counter belongs to this wrapper alone, survives across calls and is
/// never reset by invoking. It is incremented atomically, so concurrent
/// callers never lose a count and each multiple of `interval` is notified
/// exactly once. The notifier runs before the inner callable, and the inner
/// callable always runs. An interval of `0` disables notification.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::decorate::notify_every;
/// use std::sync::Mutex;
///
/// let markers = Mutex::new(Vec::new());
/// let counted = notify_every(
///     |value: i32| Ok::<_, ()>(value),
///     3,
///     |count| markers.lock().unwrap().push(count),
/// );
///
/// for value in 0..7 {
///     counted.invoke(value).unwrap();
/// }
/// assert_eq!(counted.count(), 7);
/// assert_eq!(*markers.lock().unwrap(), vec![3, 6]);
/// ```
#[derive(Debug)]
pub struct Counted<F, N> {
    inner: F,
    interval: u64,
    notifier: N,
    count: AtomicU64,
}

impl<F, N> Counted<F, N> {
    /// Wraps `inner` with a counter that notifies every `interval` calls.
    pub const fn new(inner: F, interval: u64, notifier: N) -> Self {
        Self {
            inner,
            interval,
            notifier,
            count: AtomicU64::new(0),
        }
    }

    /// Number of invocations so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// The notification interval.
    pub const fn interval(&self) -> u64 {
        self.interval
    }
}

impl<A, F, N> Callable<A> for Counted<F, N>
where
    F: Callable<A>,
    N: Fn(u64),
{
    type Output = F::Output;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<F::Output, F::Error> {
        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        if self.interval != 0 && count % self.interval == 0 {
            tracing::trace!(count, interval = self.interval, "invocation marker");
            (self.notifier)(count);
        }
        self.inner.invoke(input)
    }
}

/// Counts calls to `inner` and runs `notifier` with the running count on
/// every `interval`-th call.
pub const fn notify_every<F, N>(inner: F, interval: u64, notifier: N) -> Counted<F, N>
where
    N: Fn(u64),
{
    Counted::new(inner, interval, notifier)
}

/// Prints a `.` to standard output every `interval` calls to `inner`.
///
/// Handy as a progress marker for long batch loops.
pub fn dot_every<F>(inner: F, interval: u64) -> Counted<F, fn(u64)> {
    Counted::new(inner, interval, print_dot as fn(u64))
}

fn print_dot(_count: u64) {
    let mut stdout = std::io::stdout().lock();
    // Best effort: marker output never fails the call.
    let _ = stdout.write_all(b".");
    let _ = stdout.flush();
}
