use std::fmt;

use thiserror::Error;

/// Convenience result type for the processing entry points.
pub type ProcessingResult<T> = Result<T, ProcessingFailure>;

/// The entry point a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// [`crate::processing::process_data`] and friends.
    ProcessData,
    /// [`crate::processing::filter_data`] and friends.
    FilterData,
    /// [`crate::processing::combine_values`], `sum_numbers` and `join_strings`.
    CombineValues,
}

impl FunctionName {
    /// The snake_case name used in failure messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProcessData => "process_data",
            Self::FilterData => "filter_data",
            Self::CombineValues => "combine_values",
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which family of values `combine_values` expected after seeing the first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    /// Integers and floats.
    Numeric,
    /// UTF-8 strings.
    Text,
}

/// Coarse error taxonomy, for callers that want to branch without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An unrecognized mode flag.
    Configuration,
    /// The input shape (or first combine value) is not supported.
    UnsupportedType,
    /// Heterogeneous or otherwise incompatible values.
    TypeMismatch,
    /// `combine_values` called without arguments.
    EmptyInput,
    /// Integer accumulation left the `i64` range.
    Overflow,
    /// Two keys collapsed into one under [`crate::processing::KeyCollisionPolicy::Reject`].
    KeyCollision,
    /// The caller-supplied operation or predicate failed.
    Callback,
}

/// Error type shared by every processing entry point.
///
/// `Display` renders only the message; [`ProcessingFailure`] adds the `Error in <fn>: ` prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// The mode flag is not one of the names the function accepts.
    #[error("Invalid dict_mode: {value}")]
    InvalidDictMode { value: String },

    /// `data` is not a list, tuple or map.
    #[error("Unsupported data type. Use list, tuple, or dict.")]
    UnsupportedDataType,

    /// The first value passed to `combine_values` is neither numeric nor text.
    #[error("Unsupported type. Use numeric or string types.")]
    UnsupportedValueType,

    /// A later `combine_values` argument does not match the class of the first one.
    #[error("{}", type_mismatch_message(.expected))]
    TypeMismatch { expected: ValueClass },

    /// `combine_values` received no arguments.
    #[error("At least one argument is required.")]
    EmptyInput,

    /// A transformed key cannot be used as a map key.
    #[error("unhashable type: '{type_name}'")]
    UnhashableKey { type_name: &'static str },

    /// Two input keys transformed into the same output key.
    #[error("Duplicate key after transform: {key}")]
    KeyCollision { key: String },

    /// Integer accumulation left the `i64` range.
    #[error("integer overflow while combining values")]
    NumericOverflow,

    /// The operation or predicate returned an error.
    #[error("{0}")]
    Callback(String),
}

fn type_mismatch_message(expected: &ValueClass) -> &'static str {
    match expected {
        ValueClass::Numeric => "Cannot combine non-numeric value with numeric types.",
        ValueClass::Text => "Cannot combine non-string value with string types.",
    }
}

impl ProcessingError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDictMode { .. } => ErrorKind::Configuration,
            Self::UnsupportedDataType | Self::UnsupportedValueType => ErrorKind::UnsupportedType,
            Self::TypeMismatch { .. } | Self::UnhashableKey { .. } => ErrorKind::TypeMismatch,
            Self::NumericOverflow => ErrorKind::Overflow,
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::KeyCollision { .. } => ErrorKind::KeyCollision,
            Self::Callback(_) => ErrorKind::Callback,
        }
    }

    pub(crate) fn in_fn(self, function: FunctionName) -> ProcessingFailure {
        ProcessingFailure {
            function,
            error: self,
        }
    }
}

/// Failure half of [`ProcessingResult`].
///
/// Renders as `Error in <function>: <message>`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Error in {function}: {error}")]
pub struct ProcessingFailure {
    /// Entry point that failed.
    pub function: FunctionName,
    /// Underlying cause.
    #[source]
    pub error: ProcessingError,
}

impl ProcessingFailure {
    /// Shorthand for `self.error.kind()`.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// The message without the `Error in <function>: ` prefix.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// A plain message error for callbacks that have no error type of their own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CallbackError(pub String);

impl From<&str> for CallbackError {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CallbackError {
    fn from(value: String) -> Self {
        Self(value)
    }
}
