use std::collections::BTreeMap;
use std::fmt;

use super::BoundArguments;
use crate::callable::{Arguments, Callable, Value};
use crate::error::CallError;

/// Callable with some of its arguments fixed in advance.
///
/// On each call the bound values and the caller's arguments are merged into
/// one [`Arguments`] and handed to the inner callable:
///
/// 1. Positions are walked left to right. A position takes its bound value
///    if there is one; otherwise, when the position belongs to a declared
///    parameter, a named value for that parameter (bound first, then the
///    caller's); otherwise the caller's next positional value.
/// 2. Caller positional values left over are appended.
/// 3. Named values are the caller's, overridden by bound ones with the same
///    name.
///
/// A hole the caller leaves unfilled, or one followed by a bound value,
/// fails with [`CallError::MissingPositional`] before the inner callable
/// runs.
///
/// # Examples
///
/// ```rust
/// use fnops::args;
/// use fnops::bind::{BoundArguments, bind};
/// use fnops::callable::{Arguments, Callable, Value};
/// use fnops::error::CallError;
///
/// fn power(arguments: Arguments) -> Result<Value, CallError> {
///     let base: i64 = arguments.positional_as(0)?;
///     let exponent: u32 = arguments.positional_as(1)?;
///     Ok(Value::from(base.pow(exponent)))
/// }
///
/// let square = bind(power, BoundArguments::new().hole().arg(2));
/// assert_eq!(square.invoke(args![7]), Ok(Value::from(49)));
///
/// let power_of_two = bind(power, BoundArguments::new().named("base", 2))
///     .with_parameters(["base", "exponent"]);
/// assert_eq!(power_of_two.invoke(args![10]), Ok(Value::from(1024)));
/// ```
#[derive(Clone)]
pub struct Partial<F> {
    inner: F,
    bound: BoundArguments,
    parameters: Vec<String>,
}

impl<F> Partial<F> {
    /// Binds `bound` in front of `inner`.
    pub const fn new(inner: F, bound: BoundArguments) -> Self {
        Self {
            inner,
            bound,
            parameters: Vec::new(),
        }
    }

    /// Declares the positional parameter names of the inner callable, so a
    /// named value can cover the position of the parameter it names.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// The values bound to this instance.
    pub const fn bound(&self) -> &BoundArguments {
        &self.bound
    }

    /// Merges the bound values with the caller's `rest`.
    ///
    /// # Errors
    ///
    /// [`CallError::MissingPositional`] when a hole cannot be filled.
    pub fn resolve(&self, rest: Arguments) -> Result<Arguments, CallError> {
        let (supplied, supplied_named) = rest.into_parts();
        let mut supplied = supplied.into_iter();
        let width = self.bound.slots().len().max(self.parameters.len());

        let mut positional = Vec::with_capacity(width);
        for index in 0..width {
            let value = self
                .bound_at(index, &supplied_named)
                .or_else(|| supplied.next());
            match value {
                Some(value) => positional.push(value),
                None if self.bound.is_hole(index) || self.bound.binds_from(index) => {
                    tracing::debug!(index, "bound call left a position unfilled");
                    return Err(CallError::MissingPositional(index));
                }
                None => break,
            }
        }
        positional.extend(supplied);

        let mut named = supplied_named;
        named.extend(
            self.bound
                .named_values()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        let mut arguments = Arguments::from_positional(positional);
        for (name, value) in named {
            arguments.insert(name, value);
        }
        Ok(arguments)
    }

    fn bound_at(&self, index: usize, supplied_named: &BTreeMap<String, Value>) -> Option<Value> {
        if let Some(Some(value)) = self.bound.slots().get(index) {
            return Some(value.clone());
        }
        let name = self.parameters.get(index)?;
        self.bound
            .named_values()
            .get(name)
            .or_else(|| supplied_named.get(name))
            .cloned()
    }
}

impl<F> fmt::Debug for Partial<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Partial")
            .field("bound", &self.bound)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl<F> Callable<Arguments> for Partial<F>
where
    F: Callable<Arguments>,
    F::Error: From<CallError>,
{
    type Output = F::Output;
    type Error = F::Error;

    fn invoke(&self, rest: Arguments) -> Result<F::Output, F::Error> {
        let arguments = self.resolve(rest)?;
        self.inner.invoke(arguments)
    }
}
