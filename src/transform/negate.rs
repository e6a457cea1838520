use crate::callable::Callable;

/// Callable returning the complement of a boolean-valued callable.
///
/// Failures of the inner callable propagate unchanged.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::transform::negate;
///
/// let is_odd = negate(|value: u32| Ok::<_, ()>(value % 2 == 0));
/// assert_eq!(is_odd.invoke(3), Ok(true));
/// assert_eq!(is_odd.invoke(4), Ok(false));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Negated<F> {
    inner: F,
}

impl<F> Negated<F> {
    /// Wraps `inner`.
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Unwraps the inner callable.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<A, F> Callable<A> for Negated<F>
where
    F: Callable<A, Output = bool>,
{
    type Output = bool;
    type Error = F::Error;

    #[inline]
    fn invoke(&self, input: A) -> Result<bool, F::Error> {
        self.inner.invoke(input).map(|value| !value)
    }
}

/// Wraps `inner` so it returns the opposite boolean.
pub const fn negate<F>(inner: F) -> Negated<F> {
    Negated::new(inner)
}
