//! Dynamically-typed positional and named arguments.
//!
//! [`Arguments`] models a call site like `f(1, "two", scale = 3)`: an ordered
//! list of positional values plus a map of named values. Values are
//! [`serde_json::Value`]s, so anything convertible into JSON can be passed and
//! read back with a typed accessor.
//!
//! Two `Arguments` are equal iff they are structurally equal, and equal
//! arguments always produce the same [`canonical_key`](Arguments::canonical_key)
//! and hash, which is what makes them usable as memoization keys.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;

use crate::error::CallError;

/// A single argument value.
pub use serde_json::Value;

/// Positional and named arguments of one call.
///
/// # Examples
///
/// ```rust
/// use fnops::args;
///
/// let arguments = args![1, "two"; scale = 3];
/// assert_eq!(arguments.positional_as::<u32>(0), Ok(1));
/// assert_eq!(arguments.positional_as::<String>(1), Ok("two".to_string()));
/// assert_eq!(arguments.named_as::<u32>("scale"), Ok(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positional: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Creates arguments from positional values only.
    pub fn from_positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }

    /// Appends a positional value, builder style.
    #[must_use]
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Sets a named value, builder style.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a positional value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Sets a named value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.named.insert(name.into(), value.into())
    }

    /// The positional values in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// The named values, sorted by name.
    pub const fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// The positional value at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// The named value called `name`.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Total number of positional and named values.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Whether there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Splits the arguments into their positional and named parts.
    pub fn into_parts(self) -> (Vec<Value>, BTreeMap<String, Value>) {
        (self.positional, self.named)
    }

    /// Reads the positional value at `index` as a `T`.
    ///
    /// # Errors
    ///
    /// [`CallError::MissingPositional`] if there is no such value,
    /// [`CallError::InvalidArgument`] if it does not deserialize as `T`.
    pub fn positional_as<T: DeserializeOwned>(&self, index: usize) -> Result<T, CallError> {
        let value = self
            .get(index)
            .ok_or(CallError::MissingPositional(index))?;
        decode(index.to_string(), value)
    }

    /// Reads the named value `name` as a `T`.
    ///
    /// # Errors
    ///
    /// [`CallError::MissingNamed`] if there is no such value,
    /// [`CallError::InvalidArgument`] if it does not deserialize as `T`.
    pub fn named_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, CallError> {
        let value = self
            .get_named(name)
            .ok_or_else(|| CallError::MissingNamed(name.to_string()))?;
        decode(name.to_string(), value)
    }

    /// Deterministic text form of the arguments.
    ///
    /// Object keys at every depth are written in sorted order, so structurally
    /// equal arguments always yield the same key.
    pub fn canonical_key(&self) -> String {
        let mut key = String::from("(");
        for (index, value) in self.positional.iter().enumerate() {
            if index > 0 {
                key.push(',');
            }
            write_canonical(value, &mut key);
        }
        key.push(';');
        for (index, (name, value)) in self.named.iter().enumerate() {
            if index > 0 {
                key.push(',');
            }
            let _ = write!(key, "{}=", Value::String(name.clone()));
            write_canonical(value, &mut key);
        }
        key.push(')');
        key
    }
}

impl Hash for Arguments {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

fn decode<T: DeserializeOwned>(argument: String, value: &Value) -> Result<T, CallError> {
    serde_json::from_value(value.clone()).map_err(|error| CallError::InvalidArgument {
        argument,
        reason: error.to_string(),
    })
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|left, right| left.0.cmp(right.0));
            out.push('{');
            for (index, (name, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}:", Value::String(name.clone()));
                write_canonical(item, out);
            }
            out.push('}');
        }
        // `-0.0` compares equal to `0.0`, so it must share its key.
        Value::Number(number) if number.is_f64() && number.as_f64() == Some(0.0) => {
            out.push_str("0.0");
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

/// Builds [`Arguments`] from positional values and `name = value` pairs.
///
/// Positional values come first; named values follow a `;`.
///
/// # Examples
///
/// ```rust
/// use fnops::args;
///
/// let empty = args![];
/// assert!(empty.is_empty());
///
/// let positional = args![1, 2.5, "three"];
/// assert_eq!(positional.positional().len(), 3);
///
/// let mixed = args![10; base = 2];
/// assert_eq!(mixed.len(), 2);
///
/// let named_only = args![; verbose = true];
/// assert_eq!(named_only.named_as::<bool>("verbose"), Ok(true));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::callable::Arguments::new()
    };

    ($($value:expr),* ; $($name:ident = $named:expr),+ $(,)?) => {
        $crate::callable::Arguments::new()
            $(.with_positional($value))*
            $(.with_named(stringify!($name), $named))+
    };

    ($($value:expr),+ $(,)?) => {
        $crate::callable::Arguments::new()$(.with_positional($value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(arguments: &Arguments) -> u64 {
        let mut hasher = DefaultHasher::new();
        arguments.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_structurally_equal_arguments_share_key_and_hash() {
        let first = args![json!({"b": 1, "a": [1, 2]}); scale = 2];
        let second = Arguments::new()
            .with_named("scale", 2)
            .with_positional(json!({"a": [1, 2], "b": 1}));

        assert_eq!(first, second);
        assert_eq!(first.canonical_key(), second.canonical_key());
        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_signed_zero_shares_key_and_hash() {
        let positive = args![0.0, json!([0.0]); x = 0.0];
        let negative = args![-0.0, json!([-0.0]); x = -0.0];

        assert_eq!(positive, negative);
        assert_eq!(positive.canonical_key(), negative.canonical_key());
        assert_eq!(hash_of(&positive), hash_of(&negative));
        assert_ne!(args![0.0].canonical_key(), args![0].canonical_key());
    }

    #[test]
    fn test_positional_and_named_keys_differ() {
        let positional = args![1];
        let named = args![; x = 1];
        assert_ne!(positional.canonical_key(), named.canonical_key());
    }

    #[test]
    fn test_typed_accessors_report_missing_and_invalid() {
        let arguments = args!["text"];
        assert_eq!(
            arguments.positional_as::<u8>(3),
            Err(CallError::MissingPositional(3))
        );
        assert_eq!(
            arguments.named_as::<u8>("depth"),
            Err(CallError::MissingNamed("depth".to_string()))
        );
        assert!(matches!(
            arguments.positional_as::<u8>(0),
            Err(CallError::InvalidArgument { argument, .. }) if argument == "0"
        ));
    }

    #[test]
    fn test_canonical_key_format() {
        let arguments = args![1, "a"; z = false, b = json!(null)];
        assert_eq!(arguments.canonical_key(), r#"(1,"a";"b"=null,"z"=false)"#);
    }
}
