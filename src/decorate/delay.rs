//! Delaying every call by a fixed duration.

use std::time::Duration;

use crate::callable::Callable;

/// Callable that sleeps for a configured duration before delegating.
///
/// The sleep blocks the calling thread. A zero duration skips the sleep.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::decorate::delay;
/// use std::time::{Duration, Instant};
///
/// let slow_echo = delay(|text: &str| Ok::<_, ()>(text.len()), Duration::from_millis(5));
///
/// let started = Instant::now();
/// assert_eq!(slow_echo.invoke("abc"), Ok(3));
/// assert!(started.elapsed() >= Duration::from_millis(5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Delayed<F> {
    inner: F,
    duration: Duration,
}

impl<F> Delayed<F> {
    /// Wraps `inner` so every call waits `duration` first.
    pub const fn new(inner: F, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// The configured delay.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Switches to sleeping on the tokio timer instead of blocking the thread.
    #[cfg(feature = "async")]
    pub fn into_async(self) -> AsyncDelayed<F> {
        AsyncDelayed::new(self.inner, self.duration)
    }
}

impl<A, F: Callable<A>> Callable<A> for Delayed<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<F::Output, F::Error> {
        if !self.duration.is_zero() {
            std::thread::sleep(self.duration);
        }
        self.inner.invoke(input)
    }
}

/// Wraps `inner` so every call first sleeps for `duration`.
pub const fn delay<F>(inner: F, duration: Duration) -> Delayed<F> {
    Delayed::new(inner, duration)
}

/// Async counterpart of [`Delayed`]: awaits the tokio timer before delegating.
///
/// The inner callable stays synchronous; only the wait is asynchronous, so a
/// runtime thread is never blocked by the delay.
///
/// # Examples
///
/// ```rust
/// use fnops::decorate::delay_async;
/// use std::time::Duration;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()
///     .unwrap();
///
/// let delayed = delay_async(|value: u32| Ok::<_, ()>(value + 1), Duration::from_millis(1));
/// assert_eq!(runtime.block_on(delayed.invoke(1)), Ok(2));
/// ```
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy)]
pub struct AsyncDelayed<F> {
    inner: F,
    duration: Duration,
}

#[cfg(feature = "async")]
impl<F> AsyncDelayed<F> {
    /// Wraps `inner` so every call awaits `duration` first.
    pub const fn new(inner: F, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Waits for the configured duration, then invokes the inner callable.
    ///
    /// # Errors
    ///
    /// Propagates the inner callable's failure unchanged.
    pub async fn invoke<A>(&self, input: A) -> Result<F::Output, F::Error>
    where
        F: Callable<A>,
    {
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
        self.inner.invoke(input)
    }
}

/// Wraps `inner` so every call first awaits `duration` on the tokio timer.
#[cfg(feature = "async")]
pub const fn delay_async<F>(inner: F, duration: Duration) -> AsyncDelayed<F> {
    AsyncDelayed::new(inner, duration)
}
