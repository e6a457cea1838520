use std::convert::Infallible;
use std::fmt;

use crate::callable::Callable;

/// Callable that returns a fixed default whenever the inner callable fails.
///
/// This is the only place a failure is turned into a value. The result can
/// no longer fail, which its `Infallible` error type records. Choose a
/// default the caller can tell apart from genuine results when failures
/// need to be identified afterwards.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::transform::fallback;
///
/// let parse = fallback(|text: &str| text.parse::<i64>(), -1);
/// let parsed: Vec<i64> = ["4", "a", "15"]
///     .into_iter()
///     .map(|text| parse.invoke(text).unwrap_or_else(|never| match never {}))
///     .collect();
///
/// assert_eq!(parsed, vec![4, -1, 15]);
/// ```
#[derive(Debug, Clone)]
pub struct Fallback<F, B> {
    inner: F,
    default: B,
}

impl<F, B> Fallback<F, B> {
    /// Wraps `inner` with the substitute `default`.
    pub const fn new(inner: F, default: B) -> Self {
        Self { inner, default }
    }

    /// The substitute returned on failure.
    pub const fn default_value(&self) -> &B {
        &self.default
    }
}

impl<A, F, B> Callable<A> for Fallback<F, B>
where
    F: Callable<A, Output = B>,
    B: Clone,
{
    type Output = B;
    type Error = Infallible;

    fn invoke(&self, input: A) -> Result<B, Infallible> {
        Ok(self.inner.invoke(input).unwrap_or_else(|_| {
            tracing::debug!("failure replaced by default");
            self.default.clone()
        }))
    }
}

/// Wraps `inner` so every failure yields `default`.
pub const fn fallback<F, B>(inner: F, default: B) -> Fallback<F, B> {
    Fallback::new(inner, default)
}

/// Callable that computes a substitute from the intercepted failure.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::transform::fallback_with;
///
/// let described = fallback_with(
///     |text: &str| text.parse::<u8>().map(|value| value.to_string()),
///     |error: std::num::ParseIntError| format!("invalid: {error}"),
/// );
/// assert_eq!(described.invoke("7"), Ok("7".to_string()));
/// assert_eq!(described.invoke("x"), Ok("invalid: invalid digit found in string".to_string()));
/// ```
#[derive(Clone)]
pub struct FallbackWith<F, H> {
    inner: F,
    handler: H,
}

impl<F, H> fmt::Debug for FallbackWith<F, H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FallbackWith").finish_non_exhaustive()
    }
}

impl<A, F, H> Callable<A> for FallbackWith<F, H>
where
    F: Callable<A>,
    H: Fn(F::Error) -> F::Output,
{
    type Output = F::Output;
    type Error = Infallible;

    fn invoke(&self, input: A) -> Result<F::Output, Infallible> {
        Ok(self.inner.invoke(input).unwrap_or_else(|error| {
            tracing::debug!("failure handed to fallback handler");
            (self.handler)(error)
        }))
    }
}

/// Wraps `inner` so every failure is converted by `handler`.
pub const fn fallback_with<F, H>(inner: F, handler: H) -> FallbackWith<F, H> {
    FallbackWith { inner, handler }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strict_length(text: &str) -> Result<i64, String> {
        if text == "a" {
            Err(format!("{text} is reserved"))
        } else {
            i64::try_from(text.len()).map_err(|error| error.to_string())
        }
    }

    #[rstest]
    #[case("a", -1)]
    #[case("bb", 2)]
    #[case("", 0)]
    fn test_default_only_replaces_failures(#[case] text: &str, #[case] expected: i64) {
        let tolerant = fallback(strict_length, -1);
        assert_eq!(tolerant.invoke(text), Ok(expected));
    }

    #[test]
    fn test_batch_keeps_going_past_failures() {
        let tolerant = fallback(strict_length, -1);
        let results: Vec<i64> = ["xyz", "a", "q"]
            .into_iter()
            .filter_map(|text| tolerant.invoke(text).ok())
            .collect();
        assert_eq!(results, vec![3, -1, 1]);
        let failed = results.iter().filter(|&&value| value == -1).count();
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_handler_sees_the_error() {
        let tolerant = fallback_with(strict_length, |message: String| {
            -i64::try_from(message.len()).unwrap_or(0)
        });
        assert_eq!(tolerant.invoke("a"), Ok(-13));
        assert_eq!(tolerant.invoke("abcd"), Ok(4));
    }
}
