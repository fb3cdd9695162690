//! Stateless collection transforms.
//!
//! The processing layer operates on [`crate::types::Value`] containers and never mutates its
//! input.
//!
//! - [`process_data()`]: apply an operation to every element (map)
//! - [`filter_data()`]: keep elements matching a predicate
//! - [`combine_values()`]: fold numbers into a sum or strings into a joined string
//!
//! Each entry point returns a [`crate::ProcessingResult`]; failures carry the function name,
//! an [`crate::ErrorKind`] and a message, and render as `Error in <function>: <message>`.
//!
//! ## Example: map → filter → combine
//!
//! ```rust
//! use collection_processing::processing::{combine_values, filter_data, process_data, CombineOptions};
//! use collection_processing::types::Value;
//! use collection_processing::CallbackError;
//!
//! let data = Value::List((1..=5).map(Value::Int64).collect());
//!
//! // Triple every element.
//! let tripled = process_data(
//!     &data,
//!     |v| v.as_i64().map(|x| Value::Int64(x * 3)).ok_or(CallbackError::from("not an int")),
//!     "values",
//! )
//! .unwrap();
//!
//! // Keep the even ones.
//! let even = filter_data(
//!     &tripled,
//!     |v| Ok::<_, CallbackError>(v.as_i64().is_some_and(|x| x % 2 == 0)),
//!     "values",
//! )
//! .unwrap();
//! assert_eq!(even, Value::List(vec![Value::Int64(6), Value::Int64(12)]));
//!
//! // Sum them.
//! let total = combine_values(even.as_slice().unwrap(), &CombineOptions::default()).unwrap();
//! assert_eq!(total, Value::Int64(18));
//! ```

pub mod combine;
pub mod filter;
pub mod map;
pub mod options;

pub use combine::{combine_values, join_strings, sum_numbers};
pub use filter::{filter_data, filter_data_with};
pub use map::{process_data, process_data_with};
pub use options::{
    CombineOptions, DictMode, FilterMode, FilterOptions, KeyCollisionPolicy, ProcessOptions,
};
