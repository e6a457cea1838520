//! # fnops
//!
//! Function operators for Rust: higher-order combinators that take one or
//! more callables and return a new callable with modified behavior, while the
//! call site keeps invoking it exactly like the original.
//!
//! ## Overview
//!
//! - **Callable**: the [`Callable`](callable::Callable) trait, implemented for
//!   every `Fn(A) -> Result<B, E>`, plus dynamically-typed
//!   [`Arguments`](callable::Arguments) and a name-based
//!   [`Registry`](callable::Registry)
//! - **Composition**: `compose`, `compose!`, `pipeline!`, `fanout`
//! - **Stateful decorators**: delay, invocation counter, logger, tee,
//!   recorder, timer
//! - **Memoization**: at-most-once computation per distinct key, safe under
//!   concurrent invocation
//! - **Argument binding**: partial application over positional and named
//!   arguments with values fixed at bind time
//! - **Result transformers**: negate, fallback on failure, output capture
//! - **Predicate algebra**: short-circuiting `and`, `or`, `not`
//!
//! ## Feature Flags
//!
//! - `compose`: Composition engine
//! - `decorate`: Stateful decorators
//! - `memoize`: Memoization cache
//! - `bind`: Argument binder
//! - `predicate`: Predicate algebra
//! - `async`: Tokio-backed delay decorator
//! - `fxhash`: Use `FxHash` for memoization tables
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use fnops::prelude::*;
//! use std::convert::Infallible;
//!
//! fn square(value: u64) -> Result<u64, Infallible> {
//!     Ok(value * value)
//! }
//!
//! let cached = memoize(square);
//! assert_eq!(cached.invoke(12), Ok(144));
//! assert_eq!(cached.invoke(12), Ok(144));
//! assert_eq!(cached.stats().misses, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use fnops::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callable::*;
    pub use crate::error::*;
    pub use crate::transform::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "decorate")]
    pub use crate::decorate::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;

    #[cfg(feature = "bind")]
    pub use crate::bind::*;

    #[cfg(feature = "predicate")]
    pub use crate::predicate::*;
}

pub mod callable;
pub mod error;
pub mod transform;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "decorate")]
pub mod decorate;

#[cfg(feature = "memoize")]
pub mod memoize;

#[cfg(feature = "bind")]
pub mod bind;

#[cfg(feature = "predicate")]
pub mod predicate;
