//! `collection-processing` provides three stateless helpers over dynamically shaped collections:
//!
//! - [`processing::process_data`]: apply an operation to every element of a list, tuple or map
//! - [`processing::filter_data`]: keep the elements that satisfy a predicate
//! - [`processing::combine_values`]: sum numbers or join strings
//!
//! Data is passed as a [`types::Value`]. The supported containers are [`types::Value::List`],
//! [`types::Value::Tuple`] and [`types::Value::Map`] (an insertion-ordered
//! [`types::Mapping`]); any other value is rejected as an unsupported data type.
//!
//! ## Failures
//!
//! Every entry point returns a [`ProcessingResult`]. The failure side is a
//! [`ProcessingFailure`], which records which function failed and why:
//!
//! ```rust
//! use collection_processing::processing::{combine_values, CombineOptions};
//! use collection_processing::ErrorKind;
//!
//! let err = combine_values(&[], &CombineOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::EmptyInput);
//! assert_eq!(err.to_string(), "Error in combine_values: At least one argument is required.");
//! ```
//!
//! ## Maps and mode flags
//!
//! For maps, a mode flag selects what the callback sees. `process_data` accepts `"keys"`,
//! `"values"` (default) and `"both"`; `filter_data` accepts `"keys"`, `"values"` and
//! `"items"`, where the predicate receives the `(key, value)` pair as a tuple. Lists and tuples
//! ignore the flag.
//!
//! ```rust
//! use collection_processing::processing::{filter_data, process_data};
//! use collection_processing::types::{Key, Mapping, Value};
//! use collection_processing::CallbackError;
//!
//! let scores = Value::Map(Mapping::from_iter([
//!     (Key::from("a"), Value::Int64(1)),
//!     (Key::from("b"), Value::Int64(2)),
//!     (Key::from("c"), Value::Int64(3)),
//! ]));
//!
//! let squared = process_data(
//!     &scores,
//!     |v| v.as_i64().map(|x| Value::Int64(x * x)).ok_or(CallbackError::from("not an int")),
//!     "values",
//! )
//! .unwrap();
//! assert_eq!(squared.as_map().unwrap().get(&Key::from("c")), Some(&Value::Int64(9)));
//!
//! let above_one = filter_data(
//!     &scores,
//!     |v| Ok::<_, CallbackError>(v.as_i64().is_some_and(|x| x > 1)),
//!     "values",
//! )
//! .unwrap();
//! assert_eq!(above_one.element_count(), Some(2));
//!
//! // Unknown flags are rejected for maps.
//! let err = filter_data(&scores, |_| Ok::<_, CallbackError>(true), "both").unwrap_err();
//! assert_eq!(err.to_string(), "Error in filter_data: Invalid dict_mode: both");
//! ```
//!
//! ## Options and observers
//!
//! The `*_with` variants take an options struct ([`processing::ProcessOptions`],
//! [`processing::FilterOptions`], [`processing::CombineOptions`]) which can also carry an
//! [`observability::ProcessingObserver`] for logging:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use collection_processing::observability::StdErrObserver;
//! use collection_processing::processing::{combine_values, CombineOptions};
//! use collection_processing::types::Value;
//!
//! let opts = CombineOptions::default()
//!     .with_separator("-")
//!     .with_observer(Arc::new(StdErrObserver));
//! let joined = combine_values(&[Value::from("a"), Value::from("b"), Value::from("c")], &opts).unwrap();
//! assert_eq!(joined, Value::from("a-b-c"));
//! ```
//!
//! ## Modules
//!
//! - [`processing`]: the three entry points and their options
//! - [`types`]: the dynamic data model
//! - [`observability`]: observer hooks for logging
//! - [`error`]: error types

pub mod error;
pub mod observability;
pub mod processing;
pub mod types;

pub use error::{
    CallbackError, ErrorKind, FunctionName, ProcessingError, ProcessingFailure, ProcessingResult,
    ValueClass,
};
