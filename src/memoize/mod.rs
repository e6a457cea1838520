//! Memoization: at most one computation per distinct key.
//!
//! [`memoize`] wraps a callable with a private cache keyed by the input
//! itself; [`memoize_by`] derives the key with a custom function, and
//! [`memoize_recursive`] lets a recursive definition call back into its own
//! cache.
//!
//! Successful results are stored once and never overwritten. Failures are
//! returned to the caller and leave no entry behind, so the next call with
//! the same key computes again. Concurrent callers with the same key wait
//! for a single computation rather than each running it.
//!
//! Memoizing a callable whose result is not determined by its key (a random
//! source, a clock) freezes the first result; the cache cannot tell.
//!
//! # Examples
//!
//! ```rust
//! use fnops::callable::Callable;
//! use fnops::memoize::memoize;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let computations = AtomicUsize::new(0);
//! let slow_square = |value: u64| {
//!     computations.fetch_add(1, Ordering::SeqCst);
//!     Ok::<_, String>(value * value)
//! };
//!
//! let cached = memoize(slow_square);
//! assert_eq!(cached.invoke(9), Ok(81));
//! assert_eq!(cached.invoke(9), Ok(81));
//! assert_eq!(computations.load(Ordering::SeqCst), 1);
//! ```

mod cache;

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

pub use cache::{CachePolicy, CacheStats};

use crate::callable::Callable;
use cache::Cache;

/// Callable that caches the results of its inner callable.
///
/// `K` is the cache key, derived from each input by `KF`. For [`memoize`]
/// the key is a clone of the input.
pub struct Memoized<F, K, B, KF = fn(&K) -> K> {
    inner: F,
    key_of: KF,
    cache: Cache<K, B>,
}

impl<F, K, B, KF> Memoized<F, K, B, KF> {
    /// Replaces the cache with an empty one governed by `policy`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fnops::callable::Callable;
    /// use fnops::memoize::{CachePolicy, memoize};
    ///
    /// let cached = memoize(|value: u8| Ok::<_, ()>(value)).with_policy(CachePolicy::bounded(1));
    /// cached.invoke(1).unwrap();
    /// cached.invoke(2).unwrap();
    /// assert_eq!(cached.len(), 1);
    /// ```
    #[must_use]
    pub fn with_policy(self, policy: CachePolicy) -> Self {
        Self {
            inner: self.inner,
            key_of: self.key_of,
            cache: Cache::new(policy),
        }
    }

    /// The policy the cache follows.
    pub const fn policy(&self) -> CachePolicy {
        self.cache.policy()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no result is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Activity counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops every stored result; counters are kept.
    pub fn forget(&self) {
        self.cache.clear();
        tracing::debug!("memo cache cleared");
    }
}

impl<F, K, B, KF> fmt::Debug for Memoized<F, K, B, KF> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("policy", &self.cache.policy())
            .field("stats", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

impl<A, F, K, B, KF> Callable<A> for Memoized<F, K, B, KF>
where
    F: Callable<A, Output = B>,
    KF: Fn(&A) -> K,
    K: Hash + Eq + Clone,
    B: Clone,
{
    type Output = B;
    type Error = F::Error;

    fn invoke(&self, input: A) -> Result<B, F::Error> {
        let key = (self.key_of)(&input);
        self.cache
            .get_or_try_insert_with(key, || self.inner.invoke(input))
    }
}

/// Caches `inner`'s results keyed by the input.
///
/// Inputs that compare equal share one entry. For dynamically-typed calls,
/// [`Arguments`](crate::callable::Arguments) hashes and compares by its
/// canonical form, so structurally equal arguments hit the same entry.
pub fn memoize<F, A>(inner: F) -> Memoized<F, A, F::Output>
where
    F: Callable<A>,
    A: Hash + Eq + Clone,
    F::Output: Clone,
{
    Memoized {
        inner,
        key_of: <A as Clone>::clone as fn(&A) -> A,
        cache: Cache::new(CachePolicy::default()),
    }
}

/// Caches `inner`'s results keyed by `key_of(&input)`.
///
/// Two calls are the same call exactly when their keys are equal, so the
/// key must capture everything the result depends on.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::memoize::memoize_by;
///
/// let length = memoize_by(
///     |word: String| Ok::<_, ()>(word.len()),
///     |word: &String| word.to_lowercase(),
/// );
/// assert_eq!(length.invoke("Hello".to_string()), Ok(5));
/// assert_eq!(length.invoke("HELLO".to_string()), Ok(5));
/// assert_eq!(length.stats().hits, 1);
/// ```
pub fn memoize_by<F, A, K, KF>(inner: F, key_of: KF) -> Memoized<F, K, F::Output, KF>
where
    F: Callable<A>,
    KF: Fn(&A) -> K,
    K: Hash + Eq + Clone,
    F::Output: Clone,
{
    Memoized {
        inner,
        key_of,
        cache: Cache::new(CachePolicy::default()),
    }
}

/// Memoized recursive definition created by [`memoize_recursive`].
pub struct RecursiveMemoized<F, A, B, E> {
    body: F,
    cache: Cache<A, B>,
    error: PhantomData<fn() -> E>,
}

impl<F, A, B, E> RecursiveMemoized<F, A, B, E> {
    /// Activity counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether no result is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F, A, B, E> fmt::Debug for RecursiveMemoized<F, A, B, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RecursiveMemoized")
            .field("stats", &self.cache.stats())
            .finish_non_exhaustive()
    }
}

impl<A, B, E, F> Callable<A> for RecursiveMemoized<F, A, B, E>
where
    F: Fn(&dyn Fn(A) -> Result<B, E>, A) -> Result<B, E>,
    A: Hash + Eq + Clone,
    B: Clone,
{
    type Output = B;
    type Error = E;

    fn invoke(&self, input: A) -> Result<B, E> {
        let recurse = |argument: A| self.invoke(argument);
        self.cache
            .get_or_try_insert_with(input.clone(), || (self.body)(&recurse, input))
    }
}

/// Memoizes a recursive definition through its own cache.
///
/// `body` receives a handle that calls back into the memoized function, so
/// every sub-result is computed once. `body` must not recurse on its own
/// input: that input's entry stays locked until `body` returns, so such a
/// call blocks forever.
///
/// # Examples
///
/// ```rust
/// use fnops::callable::Callable;
/// use fnops::memoize::memoize_recursive;
/// use std::convert::Infallible;
///
/// let fibonacci = memoize_recursive(|fib: &dyn Fn(u64) -> Result<u64, Infallible>, n: u64| {
///     if n < 2 { Ok(n) } else { Ok(fib(n - 1)? + fib(n - 2)?) }
/// });
///
/// assert_eq!(fibonacci.invoke(80), Ok(23_416_728_348_467_685));
/// assert_eq!(fibonacci.stats().misses, 81);
/// ```
pub fn memoize_recursive<F, A, B, E>(body: F) -> RecursiveMemoized<F, A, B, E>
where
    F: Fn(&dyn Fn(A) -> Result<B, E>, A) -> Result<B, E>,
    A: Hash + Eq + Clone,
    B: Clone,
{
    RecursiveMemoized {
        body,
        cache: Cache::new(CachePolicy::default()),
        error: PhantomData,
    }
}
