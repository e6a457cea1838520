use std::collections::BTreeMap;

use serde::Serialize;

use crate::callable::{Arguments, Value};
use crate::error::CallError;

/// Values fixed ahead of time by a binder.
///
/// Positional slots are either a bound value or a hole left for the caller.
/// Every value is converted into a [`Value`] when it is added, so a binder
/// keeps the value current at that moment no matter what happens to the
/// source variable afterwards.
///
/// # Examples
///
/// ```rust
/// use fnops::bind::BoundArguments;
///
/// let bound = BoundArguments::new().hole().arg(10).named("base", 2);
/// assert_eq!(bound.slots().len(), 2);
/// assert!(bound.slots()[0].is_none());
/// assert_eq!(bound.named_values()["base"], 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArguments {
    slots: Vec<Option<Value>>,
    named: BTreeMap<String, Value>,
}

impl BoundArguments {
    /// Nothing bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Binds the next positional slot to `value`.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.slots.push(Some(value.into()));
        self
    }

    /// Leaves the next positional slot for the caller to fill.
    #[must_use]
    pub fn hole(mut self) -> Self {
        self.slots.push(None);
        self
    }

    /// Binds the named argument `name` to `value`.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Binds the next positional slot to any serializable value.
    ///
    /// # Errors
    ///
    /// [`CallError::InvalidArgument`] if `value` cannot be represented as a
    /// [`Value`].
    pub fn serialized<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, CallError> {
        let position = self.slots.len().to_string();
        self.slots.push(Some(encode(position, value)?));
        Ok(self)
    }

    /// Binds the named argument `name` to any serializable value.
    ///
    /// # Errors
    ///
    /// [`CallError::InvalidArgument`] if `value` cannot be represented as a
    /// [`Value`].
    pub fn named_serialized<T: Serialize + ?Sized>(
        mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, CallError> {
        let name = name.into();
        let value = encode(name.clone(), value)?;
        self.named.insert(name, value);
        Ok(self)
    }

    /// Positional slots in order; `None` marks a hole.
    pub fn slots(&self) -> &[Option<Value>] {
        &self.slots
    }

    /// Bound named values.
    pub const fn named_values(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Whether the slot at `index` is an explicit hole.
    pub(crate) fn is_hole(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    /// Whether any slot at or after `index` holds a bound value.
    pub(crate) fn binds_from(&self, index: usize) -> bool {
        self.slots.iter().skip(index).any(Option::is_some)
    }
}

impl From<Arguments> for BoundArguments {
    fn from(arguments: Arguments) -> Self {
        let (positional, named) = arguments.into_parts();
        Self {
            slots: positional.into_iter().map(Some).collect(),
            named,
        }
    }
}

fn encode<T: Serialize + ?Sized>(argument: String, value: &T) -> Result<Value, CallError> {
    serde_json::to_value(value).map_err(|error| CallError::InvalidArgument {
        argument,
        reason: error.to_string(),
    })
}
