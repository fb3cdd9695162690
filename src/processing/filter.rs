//! Predicate filtering over lists, tuples and maps.

use std::fmt;

use crate::error::{FunctionName, ProcessingError, ProcessingResult};
use crate::observability::{report, ProcessingContext};
use crate::types::{Mapping, Shape, Value};

use super::options::{FilterMode, FilterOptions};

/// Returns a new container holding only the elements of `data` for which `predicate` is `true`.
///
/// `dict_mode` is one of `"keys"`, `"values"` or `"items"` and is only parsed when `data` is
/// a map. In `"items"` mode the predicate receives `Value::Tuple([key, value])`.
pub fn filter_data<F, E>(data: &Value, predicate: F, dict_mode: &str) -> ProcessingResult<Value>
where
    F: FnMut(&Value) -> Result<bool, E>,
    E: fmt::Display,
{
    let dict_mode = match data {
        Value::Map(_) => dict_mode
            .parse::<FilterMode>()
            .map_err(|e| e.in_fn(FunctionName::FilterData))?,
        _ => FilterMode::default(),
    };
    filter_data_with(
        data,
        predicate,
        &FilterOptions::default().with_dict_mode(dict_mode),
    )
}

/// Typed variant of [`filter_data`].
///
/// Relative order is preserved and the result is always a new value, possibly empty.
pub fn filter_data_with<F, E>(
    data: &Value,
    mut predicate: F,
    options: &FilterOptions,
) -> ProcessingResult<Value>
where
    F: FnMut(&Value) -> Result<bool, E>,
    E: fmt::Display,
{
    let shape = data.shape();
    let ctx = ProcessingContext {
        function: FunctionName::FilterData,
        shape,
        mode: (shape == Shape::Map).then(|| options.dict_mode.to_string()),
    };

    let result = match data {
        Value::Map(map) => filter_map(map, &mut predicate, options.dict_mode).map(Value::Map),
        Value::List(items) => filter_all(items, &mut predicate).map(Value::List),
        Value::Tuple(items) => filter_all(items, &mut predicate).map(Value::Tuple),
        _ => Err(ProcessingError::UnsupportedDataType),
    }
    .map_err(|e| e.in_fn(FunctionName::FilterData));

    report(
        options.observer.as_ref(),
        ctx,
        data.element_count().unwrap_or(0),
        |out: &Value| out.element_count().unwrap_or(0),
        result,
    )
}

fn filter_all<F, E>(items: &[Value], predicate: &mut F) -> Result<Vec<Value>, ProcessingError>
where
    F: FnMut(&Value) -> Result<bool, E>,
    E: fmt::Display,
{
    let mut out = Vec::new();
    for item in items {
        if test(predicate, item)? {
            out.push(item.clone());
        }
    }
    Ok(out)
}

fn filter_map<F, E>(
    map: &Mapping,
    predicate: &mut F,
    mode: FilterMode,
) -> Result<Mapping, ProcessingError>
where
    F: FnMut(&Value) -> Result<bool, E>,
    E: fmt::Display,
{
    let mut out = Mapping::new();
    for (key, value) in map.iter() {
        let keep = match mode {
            FilterMode::Keys => test(predicate, &Value::from(key.clone()))?,
            FilterMode::Values => test(predicate, value)?,
            FilterMode::Items => {
                let pair = Value::Tuple(vec![Value::from(key.clone()), value.clone()]);
                test(predicate, &pair)?
            }
        };
        if keep {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(out)
}

fn test<F, E>(predicate: &mut F, value: &Value) -> Result<bool, ProcessingError>
where
    F: FnMut(&Value) -> Result<bool, E>,
    E: fmt::Display,
{
    predicate(value).map_err(|e| ProcessingError::Callback(e.to_string()))
}
