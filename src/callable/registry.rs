//! Name-based lookup of dynamically-typed callables.
//!
//! A [`Registry`] maps names to shared callables over [`Arguments`]. Lookups
//! happen once, at the boundary, and hand back a direct reference; wrappers
//! built on top of a resolved callable never look the name up again.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Arguments, Callable, Value};
use crate::error::CallError;

/// A shared, type-erased callable over [`Arguments`].
pub type DynCallable = Arc<dyn Callable<Arguments, Output = Value, Error = CallError> + Send + Sync>;

/// Mapping from names to dynamically-typed callables.
///
/// # Examples
///
/// ```rust
/// use fnops::args;
/// use fnops::callable::{Arguments, Callable, Registry, Value};
/// use fnops::error::CallError;
///
/// let mut registry = Registry::new();
/// registry.register("sum", |arguments: Arguments| -> Result<Value, CallError> {
///     let left: i64 = arguments.positional_as(0)?;
///     let right: i64 = arguments.positional_as(1)?;
///     Ok(Value::from(left + right))
/// });
///
/// let sum = registry.resolve("sum").unwrap();
/// assert_eq!(sum.invoke(args![2, 3]), Ok(Value::from(5)));
/// assert!(registry.resolve("product").is_err());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, DynCallable>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callable` under `name`, returning the entry it replaced.
    pub fn register<C>(&mut self, name: impl Into<String>, callable: C) -> Option<DynCallable>
    where
        C: Callable<Arguments, Output = Value, Error = CallError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(callable = %name, "registering callable");
        self.entries.insert(name, Arc::new(callable))
    }

    /// Looks `name` up.
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownCallable`] when nothing is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<DynCallable, CallError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| CallError::UnknownCallable(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered callables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}
