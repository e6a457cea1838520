//! Boolean combinators over predicates.
//!
//! A [`Predicate`] inspects a value by reference and answers `true`, `false`,
//! or fails. [`and`], [`or`] and [`not`] build trees of predicates evaluated
//! left to right with short-circuiting: a branch whose answer cannot change
//! the outcome is never run, so its side effects never happen. Failures of
//! any branch that does run propagate unchanged.
//!
//! # Examples
//!
//! ```rust
//! use fnops::predicate::{Predicate, PredicateExt};
//!
//! let positive = |value: &i32| Ok::<_, ()>(*value > 0);
//! let even = |value: &i32| Ok::<_, ()>(value % 2 == 0);
//!
//! let positive_odd = positive.and(even.not());
//! assert_eq!(positive_odd.test(&3), Ok(true));
//! assert_eq!(positive_odd.test(&4), Ok(false));
//! assert_eq!(positive_odd.test(&-3), Ok(false));
//! ```

use std::fmt;

use crate::callable::Callable;

/// A test over borrowed values that may fail.
///
/// Every `Fn(&T) -> Result<bool, E>` is a predicate.
pub trait Predicate<T: ?Sized> {
    /// Failure reported by the test.
    type Error;

    /// Tests `value`.
    ///
    /// # Errors
    ///
    /// Whatever failure the underlying test reports.
    fn test(&self, value: &T) -> Result<bool, Self::Error>;
}

impl<T: ?Sized, E, F> Predicate<T> for F
where
    F: Fn(&T) -> Result<bool, E>,
{
    type Error = E;

    #[inline]
    fn test(&self, value: &T) -> Result<bool, E> {
        self(value)
    }
}

/// Predicate true when both sides are; `right` runs only if `left` is true.
#[derive(Debug, Clone, Copy)]
pub struct And<P, Q> {
    left: P,
    right: Q,
}

impl<T: ?Sized, P, Q> Predicate<T> for And<P, Q>
where
    P: Predicate<T>,
    Q: Predicate<T, Error = P::Error>,
{
    type Error = P::Error;

    fn test(&self, value: &T) -> Result<bool, P::Error> {
        if !self.left.test(value)? {
            return Ok(false);
        }
        self.right.test(value)
    }
}

/// Predicate true when either side is; `right` runs only if `left` is false.
#[derive(Debug, Clone, Copy)]
pub struct Or<P, Q> {
    left: P,
    right: Q,
}

impl<T: ?Sized, P, Q> Predicate<T> for Or<P, Q>
where
    P: Predicate<T>,
    Q: Predicate<T, Error = P::Error>,
{
    type Error = P::Error;

    fn test(&self, value: &T) -> Result<bool, P::Error> {
        if self.left.test(value)? {
            return Ok(true);
        }
        self.right.test(value)
    }
}

/// Complement of a predicate.
#[derive(Debug, Clone, Copy)]
pub struct Not<P> {
    inner: P,
}

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    type Error = P::Error;

    fn test(&self, value: &T) -> Result<bool, P::Error> {
        self.inner.test(value).map(|answer| !answer)
    }
}

/// `left` and then, only if it held, `right`.
pub const fn and<P, Q>(left: P, right: Q) -> And<P, Q> {
    And { left, right }
}

/// `left` or else, only if it did not hold, `right`.
pub const fn or<P, Q>(left: P, right: Q) -> Or<P, Q> {
    Or { left, right }
}

/// The complement of `inner`.
pub const fn not<P>(inner: P) -> Not<P> {
    Not { inner }
}

/// A type-erased predicate, for building lists of unlike predicates.
pub type BoxedPredicate<'a, T, E> = Box<dyn Predicate<T, Error = E> + Send + Sync + 'a>;

/// Predicate true when every member is, testing members in order and
/// stopping at the first false one. An empty list is true.
pub struct All<'a, T: ?Sized, E> {
    members: Vec<BoxedPredicate<'a, T, E>>,
}

/// Predicate true when some member is, testing members in order and
/// stopping at the first true one. An empty list is false.
pub struct Any<'a, T: ?Sized, E> {
    members: Vec<BoxedPredicate<'a, T, E>>,
}

impl<T: ?Sized, E> Predicate<T> for All<'_, T, E> {
    type Error = E;

    fn test(&self, value: &T) -> Result<bool, E> {
        for member in &self.members {
            if !member.test(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T: ?Sized, E> Predicate<T> for Any<'_, T, E> {
    type Error = E;

    fn test(&self, value: &T) -> Result<bool, E> {
        for member in &self.members {
            if member.test(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<T: ?Sized, E> fmt::Debug for All<'_, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("All")
            .field("members", &self.members.len())
            .finish()
    }
}

impl<T: ?Sized, E> fmt::Debug for Any<'_, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Any")
            .field("members", &self.members.len())
            .finish()
    }
}

/// Conjunction of every predicate in `members`.
///
/// # Examples
///
/// ```rust
/// use fnops::predicate::{BoxedPredicate, Predicate, all};
///
/// let rules: Vec<BoxedPredicate<str, ()>> = vec![
///     Box::new(|name: &str| Ok::<_, ()>(!name.is_empty())),
///     Box::new(|name: &str| Ok::<_, ()>(name.chars().all(char::is_alphanumeric))),
/// ];
/// let valid = all(rules);
/// assert_eq!(valid.test("abc1"), Ok(true));
/// assert_eq!(valid.test("a-b"), Ok(false));
/// ```
pub fn all<'a, T: ?Sized, E>(
    members: impl IntoIterator<Item = BoxedPredicate<'a, T, E>>,
) -> All<'a, T, E> {
    All {
        members: members.into_iter().collect(),
    }
}

/// Disjunction of every predicate in `members`.
pub fn any<'a, T: ?Sized, E>(
    members: impl IntoIterator<Item = BoxedPredicate<'a, T, E>>,
) -> Any<'a, T, E> {
    Any {
        members: members.into_iter().collect(),
    }
}

/// Adapts a predicate into a [`Callable`] over owned values.
#[derive(Debug, Clone, Copy)]
pub struct Tested<P> {
    inner: P,
}

impl<T, P: Predicate<T>> Callable<T> for Tested<P> {
    type Output = bool;
    type Error = P::Error;

    #[inline]
    fn invoke(&self, input: T) -> Result<bool, P::Error> {
        self.inner.test(&input)
    }
}

/// Fluent combination for every [`Predicate`].
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// `self` and then, only if it held, `other`.
    fn and<Q>(self, other: Q) -> And<Self, Q>
    where
        Q: Predicate<T, Error = Self::Error>,
    {
        and(self, other)
    }

    /// `self` or else, only if it did not hold, `other`.
    fn or<Q>(self, other: Q) -> Or<Self, Q>
    where
        Q: Predicate<T, Error = Self::Error>,
    {
        or(self, other)
    }

    /// The complement of `self`.
    fn not(self) -> Not<Self> {
        not(self)
    }

    /// Boxes `self` for use with [`all`] and [`any`].
    fn boxed<'a>(self) -> BoxedPredicate<'a, T, Self::Error>
    where
        Self: Send + Sync + 'a,
    {
        Box::new(self)
    }

    /// Turns the predicate into a callable over owned values, so it can be
    /// decorated like any other callable.
    fn into_callable(self) -> Tested<Self>
    where
        T: Sized,
    {
        Tested { inner: self }
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn always(answer: bool) -> impl Fn(&i32) -> Result<bool, String> {
        move |_| Ok(answer)
    }

    #[rstest]
    #[case(false, false, false)]
    #[case(false, true, false)]
    #[case(true, false, false)]
    #[case(true, true, true)]
    fn test_and_truth_table(#[case] left: bool, #[case] right: bool, #[case] expected: bool) {
        assert_eq!(and(always(left), always(right)).test(&0), Ok(expected));
    }

    #[rstest]
    #[case(false, false, false)]
    #[case(false, true, true)]
    #[case(true, false, true)]
    #[case(true, true, true)]
    fn test_or_truth_table(#[case] left: bool, #[case] right: bool, #[case] expected: bool) {
        assert_eq!(or(always(left), always(right)).test(&0), Ok(expected));
    }

    #[test]
    fn test_and_skips_right_after_false() {
        let probed = Cell::new(0);
        let observing = |_: &i32| {
            probed.set(probed.get() + 1);
            Ok::<_, String>(true)
        };
        assert_eq!(and(always(false), &observing).test(&1), Ok(false));
        assert_eq!(probed.get(), 0);
        assert_eq!(and(always(true), &observing).test(&1), Ok(true));
        assert_eq!(probed.get(), 1);
    }

    #[test]
    fn test_or_skips_right_after_true() {
        let probed = Cell::new(0);
        let observing = |_: &i32| {
            probed.set(probed.get() + 1);
            Ok::<_, String>(false)
        };
        assert_eq!(or(always(true), &observing).test(&1), Ok(true));
        assert_eq!(probed.get(), 0);
    }

    #[test]
    fn test_failure_of_evaluated_branch_propagates() {
        let broken = |_: &i32| Err::<bool, _>("broken".to_string());
        assert_eq!(and(always(true), broken).test(&0), Err("broken".to_string()));
        assert_eq!(or(always(true), broken).test(&0), Ok(true));
        assert_eq!(not(broken).test(&0), Err("broken".to_string()));
    }

    #[test]
    fn test_empty_all_and_any() {
        let nothing: Vec<BoxedPredicate<i32, ()>> = Vec::new();
        assert_eq!(all(nothing).test(&1), Ok(true));
        assert_eq!(any(Vec::<BoxedPredicate<i32, ()>>::new()).test(&1), Ok(false));
    }

    #[test]
    fn test_any_stops_at_first_true() {
        let probed = AtomicBool::new(false);
        let late = |_: &i32| {
            probed.store(true, Ordering::SeqCst);
            Ok::<_, String>(true)
        };
        let members = vec![always(false).boxed(), always(true).boxed(), late.boxed()];
        assert_eq!(any(members).test(&0), Ok(true));
        assert!(!probed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_predicate_as_callable() {
        let is_long = (|text: &String| Ok::<_, ()>(text.len() > 3)).into_callable();
        assert_eq!(is_long.invoke("tiny".to_string()), Ok(true));
        assert_eq!(is_long.invoke("no".to_string()), Ok(false));
    }
}
