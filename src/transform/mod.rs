//! Decorators that change what a call returns rather than how it runs.
//!
//! - [`negate`]: complement of a boolean result
//! - [`fallback`] and [`fallback_with`]: substitute a value for a failure
//! - [`capture_output`]: return diagnostic text instead of the value
//!
//! Fallback is the only combinator in the crate that intercepts failures.
//! Everywhere else a failure passes through untouched.

mod capture;
mod fallback;
mod negate;

pub use capture::{Captured, Transcript, capture_output};
pub use fallback::{Fallback, FallbackWith, fallback, fallback_with};
pub use negate::{Negated, negate};
