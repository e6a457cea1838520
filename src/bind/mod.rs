//! Partial application over dynamically-typed arguments.
//!
//! [`bind`] fixes some positional or named arguments of a callable over
//! [`Arguments`] and returns a [`Partial`] that takes the rest. Bound values
//! are converted when the binder is built, never later, so binders created
//! in a loop each keep the value of their own iteration:
//!
//! ```rust
//! use fnops::args;
//! use fnops::bind::{BoundArguments, bind};
//! use fnops::callable::{Arguments, Callable, Value};
//! use fnops::error::CallError;
//!
//! fn add(arguments: Arguments) -> Result<Value, CallError> {
//!     let left: i64 = arguments.positional_as(0)?;
//!     let right: i64 = arguments.positional_as(1)?;
//!     Ok(Value::from(left + right))
//! }
//!
//! let adders: Vec<_> = (0..3)
//!     .map(|offset| bind(add, BoundArguments::new().arg(offset)))
//!     .collect();
//!
//! let results: Vec<Value> = adders
//!     .iter()
//!     .map(|adder| adder.invoke(args![100]).unwrap())
//!     .collect();
//! assert_eq!(results, vec![Value::from(100), Value::from(101), Value::from(102)]);
//! ```
//!
//! For plain Rust closures over typed arguments, capturing with `move` gives
//! the same guarantee and no binder is needed.

mod bound;
mod partial;

pub use bound::BoundArguments;
pub use partial::Partial;

use crate::callable::{Arguments, Callable, Registry, Value};
use crate::error::CallError;

/// Returns `inner` with `bound` fixed in front of whatever the caller passes.
pub const fn bind<F>(inner: F, bound: BoundArguments) -> Partial<F>
where
    F: Callable<Arguments>,
{
    Partial::new(inner, bound)
}

/// Looks `name` up once and binds `bound` in front of it.
///
/// # Errors
///
/// [`CallError::UnknownCallable`] when `name` is not registered.
///
/// # Examples
///
/// ```rust
/// use fnops::args;
/// use fnops::bind::{BoundArguments, bind_registered};
/// use fnops::callable::{Arguments, Callable, Registry, Value};
/// use fnops::error::CallError;
///
/// let mut registry = Registry::new();
/// registry.register("greet", |arguments: Arguments| -> Result<Value, CallError> {
///     let greeting: String = arguments.named_as("greeting")?;
///     let name: String = arguments.positional_as(0)?;
///     Ok(Value::from(format!("{greeting}, {name}")))
/// });
///
/// let hello = bind_registered(&registry, "greet", BoundArguments::new().named("greeting", "Hello"))?;
/// assert_eq!(hello.invoke(args!["Ada"]), Ok(Value::from("Hello, Ada")));
/// # Ok::<(), CallError>(())
/// ```
pub fn bind_registered(
    registry: &Registry,
    name: &str,
    bound: BoundArguments,
) -> Result<
    Partial<impl Fn(Arguments) -> Result<Value, CallError> + Send + Sync + Clone + use<>>,
    CallError,
> {
    let target = registry.resolve(name)?;
    Ok(Partial::new(
        move |arguments: Arguments| target.invoke(arguments),
        bound,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn label(arguments: Arguments) -> Result<Value, CallError> {
        let prefix: String = arguments.named_as("prefix")?;
        let value: i64 = arguments.positional_as(0)?;
        Ok(Value::from(format!("{prefix}{value}")))
    }

    #[test]
    fn test_bound_value_is_fixed_at_bind_time() {
        let mut prefix = String::from("before-");
        let labeled = bind(label, BoundArguments::new().named("prefix", prefix.as_str()));
        prefix.replace_range(.., "after-");

        assert_eq!(labeled.invoke(args![1]), Ok(Value::from("before-1")));
        assert_eq!(prefix, "after-");
    }

    #[test]
    fn test_binders_are_independent() {
        let first = bind(label, BoundArguments::new().named("prefix", "a"));
        let second = bind(label, BoundArguments::new().named("prefix", "b"));

        assert_eq!(first.invoke(args![1]), Ok(Value::from("a1")));
        assert_eq!(second.invoke(args![1]), Ok(Value::from("b1")));
        assert_eq!(first.invoke(args![2]), Ok(Value::from("a2")));
    }

    #[test]
    fn test_inner_failure_propagates_unchanged() {
        let unlabeled = bind(label, BoundArguments::new());
        assert_eq!(
            unlabeled.invoke(args![1]),
            Err(CallError::MissingNamed("prefix".to_string()))
        );
    }

    #[test]
    fn test_registered_binder_outlives_registry() {
        let labeled = {
            let mut registry = Registry::new();
            registry.register("label", label);
            let name = String::from("label");
            bind_registered(&registry, &name, BoundArguments::new().named("prefix", "#")).unwrap()
        };
        assert_eq!(labeled.invoke(args![3]), Ok(Value::from("#3")));
    }

    #[test]
    fn test_unknown_registered_name() {
        let registry = Registry::new();
        let result = bind_registered(&registry, "nothing", BoundArguments::new());
        assert!(matches!(result, Err(CallError::UnknownCallable(name)) if name == "nothing"));
    }
}
