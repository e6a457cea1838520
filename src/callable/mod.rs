//! The callable abstraction every combinator receives and returns.
//!
//! A [`Callable`] is an opaque unit of behavior that takes one input and
//! either produces an output or fails. Every `Fn(A) -> Result<B, E>` is a
//! `Callable<A>` through a blanket implementation, and every combinator in
//! this crate returns a named wrapper type that is a `Callable` too, so
//! wrapped callables nest freely.
//!
//! Multi-argument functions take a tuple, or the dynamically-typed
//! [`Arguments`] when positional and named arguments are needed (see the
//! [`bind`](crate::bind) module).
//!
//! # Examples
//!
//! ```rust
//! use fnops::callable::{Callable, CallableExt};
//!
//! fn parse(text: &str) -> Result<i64, std::num::ParseIntError> {
//!     text.parse()
//! }
//!
//! assert_eq!(parse.invoke("42"), Ok(42));
//!
//! let plain = parse.into_fn();
//! assert!(plain("x").is_err());
//! ```

mod arguments;
mod registry;

use std::marker::PhantomData;

pub use arguments::{Arguments, Value};
pub use registry::{DynCallable, Registry};

#[cfg(feature = "compose")]
use crate::compose::Composed;
#[cfg(feature = "decorate")]
use crate::decorate::{Counted, Delayed, Recorded, Silent, Tee};
#[cfg(feature = "memoize")]
use crate::memoize::Memoized;
use crate::transform::{Fallback, Negated};

/// A unit of behavior taking an `Input` and returning a result or failing.
///
/// Implemented for every `Fn(Input) -> Result<Output, Error>`, and for every
/// wrapper produced by this crate.
pub trait Callable<Input> {
    /// Value produced on success.
    type Output;
    /// Failure produced by the callable.
    type Error;

    /// Invokes the callable.
    ///
    /// # Errors
    ///
    /// Returns whatever failure the underlying behavior reports.
    fn invoke(&self, input: Input) -> Result<Self::Output, Self::Error>;
}

impl<F, A, B, E> Callable<A> for F
where
    F: Fn(A) -> Result<B, E>,
{
    type Output = B;
    type Error = E;

    #[inline]
    fn invoke(&self, input: A) -> Result<B, E> {
        self(input)
    }
}

/// Fluent wrapping for every [`Callable`].
///
/// Each method is shorthand for the matching free function, so
/// `f.memoize()` is `memoize(f)` and `f.then(g)` is `compose(g, f)`.
pub trait CallableExt<A>: Callable<A> + Sized {
    /// Runs `self`, then feeds its output to `next`.
    #[cfg(feature = "compose")]
    fn then<G>(self, next: G) -> Composed<G, Self>
    where
        G: Callable<Self::Output, Error = Self::Error>,
    {
        Composed::new(next, self)
    }

    /// Converts the failure type without touching successes.
    fn map_err<E, H>(self, handler: H) -> MapErr<Self, H>
    where
        H: Fn(Self::Error) -> E,
    {
        MapErr {
            inner: self,
            handler,
        }
    }

    /// Caches results per distinct input.
    #[cfg(feature = "memoize")]
    fn memoize(self) -> Memoized<Self, A, Self::Output>
    where
        A: std::hash::Hash + Eq + Clone,
        Self::Output: Clone,
    {
        crate::memoize::memoize(self)
    }

    /// Sleeps for `duration` before every call.
    #[cfg(feature = "decorate")]
    fn delay(self, duration: std::time::Duration) -> Delayed<Self> {
        Delayed::new(self, duration)
    }

    /// Counts calls and runs `notifier` on every `interval`-th one.
    #[cfg(feature = "decorate")]
    fn notify_every<N>(self, interval: u64, notifier: N) -> Counted<Self, N>
    where
        N: Fn(u64),
    {
        Counted::new(self, interval, notifier)
    }

    /// Wraps `self` in a tee with no observers attached yet.
    #[cfg(feature = "decorate")]
    fn tee(self) -> Tee<Self, Silent, Silent> {
        Tee::new(self)
    }

    /// Keeps an ordered history of every call.
    #[cfg(feature = "decorate")]
    fn record(self) -> Recorded<Self, A, Self::Output>
    where
        A: Clone,
        Self::Output: Clone,
    {
        Recorded::new(self)
    }

    /// Returns `default` whenever `self` fails.
    fn fallback(self, default: Self::Output) -> Fallback<Self, Self::Output>
    where
        Self::Output: Clone,
    {
        Fallback::new(self, default)
    }

    /// Returns the complement of a boolean result.
    fn negate(self) -> Negated<Self>
    where
        Self: Callable<A, Output = bool>,
    {
        Negated::new(self)
    }

    /// Turns the callable back into a plain closure.
    fn into_fn(self) -> impl Fn(A) -> Result<Self::Output, Self::Error> {
        move |input| self.invoke(input)
    }
}

impl<A, C: Callable<A>> CallableExt<A> for C {}

/// Callable produced by [`CallableExt::map_err`].
#[derive(Debug, Clone)]
pub struct MapErr<C, H> {
    inner: C,
    handler: H,
}

impl<A, C, H, E> Callable<A> for MapErr<C, H>
where
    C: Callable<A>,
    H: Fn(C::Error) -> E,
{
    type Output = C::Output;
    type Error = E;

    fn invoke(&self, input: A) -> Result<C::Output, E> {
        self.inner.invoke(input).map_err(&self.handler)
    }
}

/// An infallible function promoted to a [`Callable`] with error type `E`.
///
/// Created by [`lift`], [`identity`] and [`constant`].
pub struct Lift<F, E> {
    function: F,
    error: PhantomData<fn() -> E>,
}

impl<F: Clone, E> Clone for Lift<F, E> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            error: PhantomData,
        }
    }
}

impl<F, E> std::fmt::Debug for Lift<F, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Lift").finish_non_exhaustive()
    }
}

impl<F, A, B, E> Callable<A> for Lift<F, E>
where
    F: Fn(A) -> B,
{
    type Output = B;
    type Error = E;

    #[inline]
    fn invoke(&self, input: A) -> Result<B, E> {
        Ok((self.function)(input))
    }
}

/// Promotes an infallible function to a callable that never fails.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::{Callable, lift};
///
/// let double = lift::<_, String>(|value: i32| value * 2);
/// assert_eq!(double.invoke(21), Ok(42));
/// ```
#[inline]
pub const fn lift<F, E>(function: F) -> Lift<F, E> {
    Lift {
        function,
        error: PhantomData,
    }
}

/// The identity callable: returns its input unchanged.
///
/// The unit element of composition: `compose(identity(), f)` and
/// `compose(f, identity())` both behave like `f`.
#[inline]
pub fn identity<T, E>() -> Lift<fn(T) -> T, E> {
    lift(std::convert::identity as fn(T) -> T)
}

/// A callable that ignores its input and always returns `value`.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::{Callable, constant};
///
/// let always_five = constant::<_, ()>(5);
/// assert_eq!(always_five.invoke("ignored"), Ok(5));
/// assert_eq!(always_five.invoke(100), Ok(5));
/// ```
#[inline]
pub const fn constant<T: Clone, E>(value: T) -> Constant<T, E> {
    Constant {
        value,
        error: PhantomData,
    }
}

/// Callable produced by [`constant`].
pub struct Constant<T, E> {
    value: T,
    error: PhantomData<fn() -> E>,
}

impl<T: std::fmt::Debug, E> std::fmt::Debug for Constant<T, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Constant")
            .field("value", &self.value)
            .finish()
    }
}

impl<A, T: Clone, E> Callable<A> for Constant<T, E> {
    type Output = T;
    type Error = E;

    #[inline]
    fn invoke(&self, _input: A) -> Result<T, E> {
        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halve(value: i32) -> Result<i32, String> {
        if value % 2 == 0 {
            Ok(value / 2)
        } else {
            Err(format!("{value} is odd"))
        }
    }

    #[test]
    fn test_fn_item_is_callable() {
        assert_eq!(halve.invoke(8), Ok(4));
        assert_eq!(halve.invoke(3), Err("3 is odd".to_string()));
    }

    #[test]
    fn test_map_err_only_touches_failures() {
        let lengths = halve.map_err(|message: String| message.len());
        assert_eq!(lengths.invoke(10), Ok(5));
        assert_eq!(lengths.invoke(7), Err(8));
    }

    #[test]
    fn test_identity_and_constant() {
        let same = identity::<&str, ()>();
        assert_eq!(same.invoke("hello"), Ok("hello"));

        let always = constant::<_, ()>(String::from("fixed"));
        assert_eq!(always.invoke(1), Ok("fixed".to_string()));
        assert_eq!(always.invoke(2), Ok("fixed".to_string()));
    }

    #[test]
    fn test_into_fn_round_trips_behavior() {
        let plain = halve.into_fn();
        assert_eq!(plain(6), Ok(3));
        assert!(plain(5).is_err());
    }
}
