//! Query identity: operation name plus normalized arguments.

use std::collections::BTreeMap;
use std::fmt;

/// A normalized scalar query argument.
///
/// Arguments are restricted to scalars so that two keys describing the same
/// logical request compare equal by value, regardless of how they were
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgValue {
    /// An omitted optional argument. Distinct from the argument being absent
    /// entirely, so `filter=null` and "no filter argument" stay separate keys.
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<V: Into<ArgValue>> From<Option<V>> for ArgValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The normalized identity of a query request.
///
/// Used for cache lookup and staleness comparison: two keys are equal iff
/// the operation and every argument match by value. Arguments are held in a
/// `BTreeMap`, so equality and hashing are independent of insertion order.
///
/// # Example
///
/// ```
/// use girder_query::QueryKey;
///
/// let key = QueryKey::new("investors").arg("page", 1).arg("size", 20);
/// assert_eq!(key, QueryKey::new("investors").arg("size", 20).arg("page", 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    operation: String,
    args: BTreeMap<String, ArgValue>,
}

impl QueryKey {
    /// Creates a key for the given operation with no arguments.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            args: BTreeMap::new(),
        }
    }

    /// Adds an argument. Setting the same name twice keeps the last value.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the normalized argument set.
    pub fn args(&self) -> &BTreeMap<String, ArgValue> {
        &self.args
    }

    /// Looks up a single argument by name.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        for (i, (name, value)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}
