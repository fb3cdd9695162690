//! Folding a list of homogeneous values into one.

use crate::error::{FunctionName, ProcessingError, ProcessingResult, ValueClass};
use crate::observability::{report, ProcessingContext};
use crate::types::{Number, Shape, Value};

use super::options::CombineOptions;

/// Combines `values` into a single aggregate.
///
/// - Numeric first value: `start + values[0] + values[1] + ...`. Integers stay integers
///   unless a float shows up. `Bool` counts as numeric (`0` or `1`).
/// - Text first value: all values joined by `separator`. `start` is not used.
/// - Anything else first (including `Null`) is unsupported.
///
/// ```rust
/// use collection_processing::processing::{combine_values, CombineOptions};
/// use collection_processing::types::Value;
///
/// let sum = combine_values(
///     &[Value::Int64(1), Value::Int64(2), Value::Int64(3)],
///     &CombineOptions::default().with_start(10),
/// )
/// .unwrap();
/// assert_eq!(sum, Value::Int64(16));
/// ```
pub fn combine_values(values: &[Value], options: &CombineOptions) -> ProcessingResult<Value> {
    let ctx = ProcessingContext {
        function: FunctionName::CombineValues,
        shape: Shape::Scalar,
        mode: None,
    };

    let result = combine(values, options).map_err(|e| e.in_fn(FunctionName::CombineValues));

    report(options.observer.as_ref(), ctx, values.len(), |_| 1, result)
}

fn combine(values: &[Value], options: &CombineOptions) -> Result<Value, ProcessingError> {
    let (first, rest) = values.split_first().ok_or(ProcessingError::EmptyInput)?;

    match first {
        Value::Int64(_) | Value::Float64(_) | Value::Bool(_) => {
            let mut total = options.start;
            for value in values {
                let n = Number::try_from(value).map_err(|_| ProcessingError::TypeMismatch {
                    expected: ValueClass::Numeric,
                })?;
                total = total.checked_add(n)?;
            }
            Ok(total.into())
        }
        Value::Utf8(s) => {
            let mut out = s.clone();
            for value in rest {
                let part = value.as_str().ok_or(ProcessingError::TypeMismatch {
                    expected: ValueClass::Text,
                })?;
                out.push_str(&options.separator);
                out.push_str(part);
            }
            Ok(Value::Utf8(out))
        }
        _ => Err(ProcessingError::UnsupportedValueType),
    }
}

/// Sums `values` starting from `start`.
pub fn sum_numbers(values: &[Number], start: Number) -> ProcessingResult<Number> {
    if values.is_empty() {
        return Err(ProcessingError::EmptyInput.in_fn(FunctionName::CombineValues));
    }
    values
        .iter()
        .try_fold(start, |acc, n| acc.checked_add(*n))
        .map_err(|e| e.in_fn(FunctionName::CombineValues))
}

/// Joins `values` with `separator`.
pub fn join_strings<S: AsRef<str>>(values: &[S], separator: &str) -> ProcessingResult<String> {
    if values.is_empty() {
        return Err(ProcessingError::EmptyInput.in_fn(FunctionName::CombineValues));
    }
    let parts: Vec<&str> = values.iter().map(|s| s.as_ref()).collect();
    Ok(parts.join(separator))
}
