//! A dynamic value tree with a deep-copy operation. Independent of the
//! invitation filter, the two share no state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A value of unknown shape: primitive, ordered sequence, keyed mapping or
/// callable. The enum is closed, so every shape a caller can build has a
/// defined clone rule.
#[derive(Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
    Callable(Callable),
}

impl Value {
    /// Produces a replica sharing no mutable storage with the original.
    ///
    /// Primitives come back as equal values. Sequences and mappings are
    /// rebuilt with every element deep-cloned. Callables come back as a new
    /// callable delegating to the original function object, with a
    /// deep-cloned copy of any attached properties.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(value) => Value::Bool(*value),
            Value::Number(value) => Value::Number(*value),
            Value::Text(value) => Value::Text(value.clone()),
            Value::Sequence(items) => {
                Value::Sequence(items.iter().map(Value::deep_clone).collect())
            }
            Value::Mapping(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            ),
            Value::Callable(callable) => Value::Callable(callable.delegate()),
        }
    }
}

/// A function object with attached properties, for callables that double as
/// namespaces.
pub struct Callable {
    target: Arc<CallableFn>,
    props: BTreeMap<String, Value>,
}

impl Callable {
    pub fn new(target: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Callable {
            target: Arc::new(target),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn set_prop(&mut self, key: impl Into<String>, value: Value) {
        self.props.insert(key.into(), value);
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Forwards the call to the underlying function object.
    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.target)(args)
    }

    /// A new callable bound to the same function object, carrying its own
    /// deep-cloned copy of the properties.
    fn delegate(&self) -> Callable {
        Callable {
            target: Arc::clone(&self.target),
            props: self
                .props
                .iter()
                .map(|(key, value)| (key.clone(), value.deep_clone()))
                .collect(),
        }
    }
}

/// Callables compare by function-object identity plus properties, there is
/// no structural equality for code.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.target, &other.target) && self.props == other.props
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
