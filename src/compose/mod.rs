//! Sequential and parallel combination of callables.
//!
//! # Overview
//!
//! - [`compose`] / [`compose!`]: right-to-left composition, `compose(f, g)(x) = f(g(x))`
//! - [`pipeline!`]: left-to-right composition, `pipeline!(g, f) = compose!(f, g)`
//! - [`fanout`]: feeds one input to two callables and pairs their results
//!
//! # Composition
//!
//! Given `g: A -> B` and `f: B -> C`, the composition `f . g: A -> C` is
//!
//! ```text
//! (f . g)(x) = f(g(x))
//! ```
//!
//! `g` receives the composed callable's full input, `f` receives only `g`'s
//! output. Composing more than two callables folds right-associatively,
//! `compose!(f, g, h) = compose(f, compose(g, h))`, so the last callable runs
//! first.
//!
//! Composition adds no error handling: if `g` fails, `f` never runs and the
//! failure propagates unchanged. Wrap with
//! [`fallback`](crate::transform::fallback) to tolerate failures.
//!
//! # Laws
//!
//! - **Application**: `compose(f, g).invoke(x) == g.invoke(x).and_then(|y| f.invoke(y))`
//! - **Left Identity**: `compose(identity(), f) == f`
//! - **Right Identity**: `compose(f, identity()) == f`
//!
//! # Examples
//!
//! ```
//! use fnops::callable::{Callable, CallableExt};
//! use fnops::compose::{compose, fanout};
//!
//! fn add_one(x: i32) -> Result<i32, String> { Ok(x + 1) }
//! fn double(x: i32) -> Result<i32, String> { Ok(x * 2) }
//!
//! assert_eq!(compose(add_one, double).invoke(5), Ok(11));
//! assert_eq!(double.then(add_one).invoke(5), Ok(11));
//! assert_eq!(fanout(add_one, double).invoke(5), Ok((6, 10)));
//! ```

mod compose_macro;

use crate::callable::Callable;

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::compose;
pub use crate::pipeline;

/// Callable produced by [`compose`]: runs `inner`, then `outer` on its output.
#[derive(Debug, Clone, Copy)]
pub struct Composed<F, G> {
    outer: F,
    inner: G,
}

impl<F, G> Composed<F, G> {
    /// Composes `outer` after `inner`.
    pub const fn new(outer: F, inner: G) -> Self {
        Self { outer, inner }
    }

    /// Splits the composition back into `(outer, inner)`.
    pub fn into_parts(self) -> (F, G) {
        (self.outer, self.inner)
    }
}

impl<A, F, G> Callable<A> for Composed<F, G>
where
    G: Callable<A>,
    F: Callable<G::Output, Error = G::Error>,
{
    type Output = F::Output;
    type Error = G::Error;

    #[inline]
    fn invoke(&self, input: A) -> Result<F::Output, G::Error> {
        let intermediate = self.inner.invoke(input)?;
        self.outer.invoke(intermediate)
    }
}

/// Composes two callables right to left: the result runs `inner` first.
///
/// # Examples
///
/// ```
/// use fnops::callable::Callable;
/// use fnops::compose::compose;
///
/// fn to_length(text: String) -> Result<usize, ()> { Ok(text.len()) }
/// fn render(value: i32) -> Result<String, ()> { Ok(value.to_string()) }
///
/// let digits = compose(to_length, render);
/// assert_eq!(digits.invoke(12345), Ok(5));
/// ```
#[inline]
pub const fn compose<F, G>(outer: F, inner: G) -> Composed<F, G> {
    Composed::new(outer, inner)
}

/// Callable produced by [`fanout`].
#[derive(Debug, Clone, Copy)]
pub struct Fanout<F, G> {
    left: F,
    right: G,
}

impl<A, F, G> Callable<A> for Fanout<F, G>
where
    A: Clone,
    F: Callable<A>,
    G: Callable<A, Error = F::Error>,
{
    type Output = (F::Output, G::Output);
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<Self::Output, F::Error> {
        let left = self.left.invoke(input.clone())?;
        let right = self.right.invoke(input)?;
        Ok((left, right))
    }
}

/// Runs both callables on the same input and pairs their results.
///
/// `left` runs first; if it fails, `right` is not invoked.
#[inline]
pub const fn fanout<F, G>(left: F, right: G) -> Fanout<F, G> {
    Fanout { left, right }
}
