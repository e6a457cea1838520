//! The `compose!` and `pipeline!` macros.
//!
//! Both expand to nested [`Composed`](crate::compose::Composed) values, so the
//! result is a [`Callable`](crate::callable::Callable) that can be wrapped
//! again like any other.

/// Composes callables from right to left.
///
/// `compose!(f, g, h).invoke(x)` is `h(x)`, then `g` on that, then `f` on
/// that: the **last** callable runs **first**. More than two callables are
/// folded right-associatively, `compose!(f, g, h) == compose!(f, compose!(g, h))`.
///
/// The first failure stops the chain; later (outer) callables never run and
/// the failure comes back unchanged.
///
/// # Syntax
///
/// - `compose!(f)` - Returns `f` unchanged
/// - `compose!(f, g)` - Returns `compose(f, g)`
/// - `compose!(f, g, h, ...)` - Returns `compose(f, compose!(g, h, ...))`
///
/// # Examples
///
/// ```
/// use fnops::callable::Callable;
/// use fnops::compose;
///
/// fn add_one(x: i32) -> Result<i32, String> { Ok(x + 1) }
/// fn double(x: i32) -> Result<i32, String> { Ok(x * 2) }
/// fn square(x: i32) -> Result<i32, String> { Ok(x * x) }
///
/// // add_one(double(square(3))) = add_one(double(9)) = add_one(18) = 19
/// let composed = compose!(add_one, double, square);
/// assert_eq!(composed.invoke(3), Ok(19));
/// ```
///
/// ## Failures short-circuit
///
/// ```
/// use fnops::callable::Callable;
/// use fnops::compose;
///
/// fn parse(text: &str) -> Result<i32, String> {
///     text.parse().map_err(|_| format!("not a number: {text}"))
/// }
/// fn double(x: i32) -> Result<i32, String> { Ok(x * 2) }
///
/// let parse_and_double = compose!(double, parse);
/// assert_eq!(parse_and_double.invoke("21"), Ok(42));
/// assert_eq!(parse_and_double.invoke("x"), Err("not a number: x".to_string()));
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr $(,)?) => {
        $function
    };

    ($outer_function:expr, $inner_function:expr $(,)?) => {
        $crate::compose::compose($outer_function, $inner_function)
    };

    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {
        $crate::compose::compose(
            $outer_function,
            $crate::compose!($($remaining_functions),+),
        )
    };
}

/// Chains callables from left to right.
///
/// `pipeline!(f, g, h)` is `compose!(h, g, f)`: the **first** callable runs
/// first, which reads in data-flow order.
///
/// # Examples
///
/// ```
/// use fnops::callable::Callable;
/// use fnops::{compose, pipeline};
///
/// fn trim(text: String) -> Result<String, ()> { Ok(text.trim().to_string()) }
/// fn shout(text: String) -> Result<String, ()> { Ok(text.to_uppercase()) }
/// fn exclaim(text: String) -> Result<String, ()> { Ok(format!("{text}!")) }
///
/// let cleaned = pipeline!(trim, shout, exclaim);
/// assert_eq!(cleaned.invoke("  hi ".to_string()), Ok("HI!".to_string()));
///
/// let same = compose!(exclaim, shout, trim);
/// assert_eq!(same.invoke("  hi ".to_string()), Ok("HI!".to_string()));
/// ```
#[macro_export]
macro_rules! pipeline {
    // Internal: move callables one at a time onto the front of the list.
    (@reversed [$($reversed:expr),+]) => {
        $crate::compose!($($reversed),+)
    };

    (@reversed [$($reversed:expr),+] $next:expr $(, $rest:expr)*) => {
        $crate::pipeline!(@reversed [$next, $($reversed),+] $($rest),*)
    };

    ($function:expr $(,)?) => {
        $function
    };

    ($first_function:expr, $($remaining_functions:expr),+ $(,)?) => {
        $crate::pipeline!(@reversed [$first_function] $($remaining_functions),+)
    };
}
