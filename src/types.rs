//! Core data model.
//!
//! Callers hand dynamically shaped data to the processing functions as a [`Value`]. The
//! container variants are [`Value::List`] (mutable ordered sequence), [`Value::Tuple`]
//! (immutable ordered sequence) and [`Value::Map`] (an insertion-ordered [`Mapping`]).
//! Everything else is a scalar.

use std::collections::HashMap;
use std::fmt;

use crate::error::ProcessingError;

/// The container shape of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// [`Value::List`].
    List,
    /// [`Value::Tuple`].
    Tuple,
    /// [`Value::Map`].
    Map,
    /// Any non-container value.
    Scalar,
}

/// A single dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Mutable ordered sequence.
    List(Vec<Value>),
    /// Immutable ordered sequence.
    Tuple(Vec<Value>),
    /// Insertion-ordered key/value mapping.
    Map(Mapping),
}

impl Value {
    /// Container shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Self::List(_) => Shape::List,
            Self::Tuple(_) => Shape::Tuple,
            Self::Map(_) => Shape::Map,
            _ => Shape::Scalar,
        }
    }

    /// Short lowercase type name, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int64(_) => "int",
            Self::Float64(_) => "float",
            Self::Utf8(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "dict",
        }
    }

    /// Number of elements for containers, `None` for scalars.
    pub fn element_count(&self) -> Option<usize> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items.len()),
            Self::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string, if this is a `Utf8`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the mapping, if this is a `Map`.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Self::Map(v)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Self::Null,
            Key::Bool(v) => Self::Bool(v),
            Key::Int64(v) => Self::Int64(v),
            Key::Float64(v) => Self::Float64(v.get()),
            Key::Utf8(s) => Self::Utf8(s),
            Key::Tuple(items) => Self::Tuple(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<serde_json::Value> for Value {
    /// JSON arrays become lists and objects become maps with string keys.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int64(i),
                None => n.as_f64().map(Self::Float64).unwrap_or(Self::Null),
            },
            serde_json::Value::String(s) => Self::Utf8(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Self::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Utf8(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A hashable mapping key.
///
/// Lists and maps cannot be keys; converting them fails with
/// [`ProcessingError::UnhashableKey`]. Floats are keyed through [`FloatKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Null key.
    Null,
    /// Boolean key.
    Bool(bool),
    /// Integer key.
    Int64(i64),
    /// Float key, compared by canonical bit pattern.
    Float64(FloatKey),
    /// String key.
    Utf8(String),
    /// Tuple of keys.
    Tuple(Vec<Key>),
}

/// An `f64` usable as a map key.
///
/// Equality and hashing use the bit pattern after canonicalization: `-0.0` equals `0.0` and
/// every NaN equals every other NaN.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    /// Wrap a float.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// The wrapped float.
    pub fn get(self) -> f64 {
        self.0
    }

    fn canonical_bits(self) -> u64 {
        if self.0.is_nan() {
            f64::NAN.to_bits()
        } else if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for FloatKey {}

impl std::hash::Hash for FloatKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Key {
    fn from(v: f64) -> Self {
        Self::Float64(FloatKey(v))
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

impl TryFrom<Value> for Key {
    type Error = ProcessingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(v) => Ok(Self::Bool(v)),
            Value::Int64(v) => Ok(Self::Int64(v)),
            Value::Float64(v) => Ok(Self::Float64(FloatKey(v))),
            Value::Utf8(s) => Ok(Self::Utf8(s)),
            Value::Tuple(items) => items
                .into_iter()
                .map(Key::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Tuple),
            other => Err(ProcessingError::UnhashableKey {
                type_name: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{:?}", v.get()),
            Self::Utf8(s) => write!(f, "{s:?}"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Insertion-ordered map from [`Key`] to [`Value`].
///
/// Re-inserting an existing key replaces its value in place, so the key keeps the position
/// of its first insertion. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(Key, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A numeric value for [`crate::processing::sum_numbers`] and combine start values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
}

impl Number {
    /// Add two numbers. Integers stay integers (checked); any float promotes the result.
    pub fn checked_add(self, rhs: Number) -> Result<Number, ProcessingError> {
        match (self, rhs) {
            (Self::Int64(a), Self::Int64(b)) => a
                .checked_add(b)
                .map(Self::Int64)
                .ok_or(ProcessingError::NumericOverflow),
            (a, b) => Ok(Self::Float64(a.as_f64() + b.as_f64())),
        }
    }

    /// The value as a float, widening integers.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int64(v) => v as f64,
            Self::Float64(v) => v,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::Int64(0)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

/// Booleans count as the integers `0` and `1`.
impl TryFrom<&Value> for Number {
    type Error = ProcessingError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int64(v) => Ok(Self::Int64(*v)),
            Value::Float64(v) => Ok(Self::Float64(*v)),
            Value::Bool(v) => Ok(Self::Int64(i64::from(*v))),
            _ => Err(ProcessingError::UnsupportedValueType),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int64(v) => Value::Int64(v),
            Number::Float64(v) => Value::Float64(v),
        }
    }
}
