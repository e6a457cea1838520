//! Measuring how long each call takes.

use std::time::{Duration, Instant};

use crate::callable::Callable;

/// A value together with the time it took to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing<B> {
    /// The inner callable's output.
    pub value: B,
    /// Wall-clock time spent in the inner callable.
    pub elapsed: Duration,
}

/// Callable that returns the inner output paired with its elapsed time.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::decorate::timed;
/// use std::time::Duration;
///
/// let measured = timed(|millis: u64| {
///     std::thread::sleep(Duration::from_millis(millis));
///     Ok::<_, ()>(millis)
/// });
///
/// let timing = measured.invoke(3).unwrap();
/// assert_eq!(timing.value, 3);
/// assert!(timing.elapsed >= Duration::from_millis(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timed<F> {
    inner: F,
}

impl<A, F: Callable<A>> Callable<A> for Timed<F> {
    type Output = Timing<F::Output>;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<Timing<F::Output>, F::Error> {
        let started = Instant::now();
        let value = self.inner.invoke(input)?;
        let elapsed = started.elapsed();
        tracing::trace!(?elapsed, "timed call finished");
        Ok(Timing { value, elapsed })
    }
}

/// Wraps `inner` so each result reports how long it took.
pub const fn timed<F>(inner: F) -> Timed<F> {
    Timed { inner }
}
