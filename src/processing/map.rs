//! Element-wise transforms over lists, tuples and maps.

use std::fmt;

use crate::error::{FunctionName, ProcessingError, ProcessingResult};
use crate::observability::{report, ProcessingContext};
use crate::types::{Key, Mapping, Shape, Value};

use super::options::{DictMode, KeyCollisionPolicy, ProcessOptions};

/// Applies `operation` to every element of `data`, producing a container of the same shape.
///
/// `dict_mode` is one of `"keys"`, `"values"` or `"both"` and is only parsed when `data` is a
/// map; lists and tuples ignore it. See [`process_data_with`] for the typed variant.
///
/// ```rust
/// use collection_processing::processing::process_data;
/// use collection_processing::types::Value;
/// use collection_processing::CallbackError;
///
/// let data = Value::List(vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]);
/// let out = process_data(
///     &data,
///     |v| v.as_i64().map(|x| Value::Int64(x * 2)).ok_or(CallbackError::from("not an int")),
///     "values",
/// )
/// .unwrap();
/// assert_eq!(out, Value::List(vec![Value::Int64(2), Value::Int64(4), Value::Int64(6)]));
/// ```
pub fn process_data<F, E>(data: &Value, operation: F, dict_mode: &str) -> ProcessingResult<Value>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    let dict_mode = match data {
        Value::Map(_) => dict_mode
            .parse::<DictMode>()
            .map_err(|e| e.in_fn(FunctionName::ProcessData))?,
        _ => DictMode::default(),
    };
    process_data_with(
        data,
        operation,
        &ProcessOptions::default().with_dict_mode(dict_mode),
    )
}

/// Typed variant of [`process_data`].
///
/// - `List` → new `List`, `Tuple` → new `Tuple`, same length and order.
/// - `Map` → new `Map` transformed per [`ProcessOptions::dict_mode`]. In `Keys`/`Both` mode,
///   colliding output keys follow [`ProcessOptions::key_collisions`].
/// - Anything else fails with [`ProcessingError::UnsupportedDataType`].
///
/// Stops at the first error returned by `operation`.
pub fn process_data_with<F, E>(
    data: &Value,
    mut operation: F,
    options: &ProcessOptions,
) -> ProcessingResult<Value>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    let shape = data.shape();
    let ctx = ProcessingContext {
        function: FunctionName::ProcessData,
        shape,
        mode: (shape == Shape::Map).then(|| options.dict_mode.to_string()),
    };

    let result = transform(data, &mut operation, options)
        .map_err(|e| e.in_fn(FunctionName::ProcessData));

    report(
        options.observer.as_ref(),
        ctx,
        data.element_count().unwrap_or(0),
        |out: &Value| out.element_count().unwrap_or(0),
        result,
    )
}

fn transform<F, E>(
    data: &Value,
    operation: &mut F,
    options: &ProcessOptions,
) -> Result<Value, ProcessingError>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    match data {
        Value::Map(map) => transform_map(map, operation, options).map(Value::Map),
        Value::List(items) => transform_all(items, operation).map(Value::List),
        Value::Tuple(items) => transform_all(items, operation).map(Value::Tuple),
        _ => Err(ProcessingError::UnsupportedDataType),
    }
}

fn transform_all<F, E>(items: &[Value], operation: &mut F) -> Result<Vec<Value>, ProcessingError>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    items.iter().map(|item| call(operation, item)).collect()
}

fn transform_map<F, E>(
    map: &Mapping,
    operation: &mut F,
    options: &ProcessOptions,
) -> Result<Mapping, ProcessingError>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    let mut out = Mapping::with_capacity(map.len());
    for (key, value) in map.iter() {
        let (new_key, new_value) = match options.dict_mode {
            DictMode::Values => (key.clone(), call(operation, value)?),
            DictMode::Keys => (transform_key(key, operation)?, value.clone()),
            DictMode::Both => {
                // Key first, then value.
                let new_key = transform_key(key, operation)?;
                (new_key, call(operation, value)?)
            }
        };

        if options.key_collisions == KeyCollisionPolicy::Reject && out.contains_key(&new_key) {
            return Err(ProcessingError::KeyCollision {
                key: new_key.to_string(),
            });
        }
        out.insert(new_key, new_value);
    }
    Ok(out)
}

fn transform_key<F, E>(key: &Key, operation: &mut F) -> Result<Key, ProcessingError>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    let transformed = call(operation, &Value::from(key.clone()))?;
    Key::try_from(transformed)
}

fn call<F, E>(operation: &mut F, value: &Value) -> Result<Value, ProcessingError>
where
    F: FnMut(&Value) -> Result<Value, E>,
    E: fmt::Display,
{
    operation(value).map_err(|e| ProcessingError::Callback(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{process_data, process_data_with};
    use crate::error::{CallbackError, ErrorKind, FunctionName, ProcessingError};
    use crate::processing::options::{DictMode, KeyCollisionPolicy, ProcessOptions};
    use crate::types::{Key, Mapping, Value};

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int64).collect()
    }

    fn sample_map() -> Value {
        Value::Map(Mapping::from_iter([
            (Key::from("a"), Value::Int64(1)),
            (Key::from("b"), Value::Int64(2)),
        ]))
    }

    fn square(v: &Value) -> Result<Value, CallbackError> {
        v.as_i64()
            .map(|x| Value::Int64(x * x))
            .ok_or_else(|| CallbackError::from(format!("cannot square {}", v.type_name())))
    }

    fn upper(v: &Value) -> Result<Value, CallbackError> {
        v.as_str()
            .map(|s| Value::from(s.to_uppercase()))
            .ok_or_else(|| CallbackError::from("expected a string"))
    }

    #[test]
    fn list_and_tuple_keep_their_shape() {
        let list = process_data(&Value::List(ints(&[1, 2, 3])), square, "values").unwrap();
        assert_eq!(list, Value::List(ints(&[1, 4, 9])));

        let tuple = process_data(&Value::Tuple(ints(&[1, 2, 3])), square, "values").unwrap();
        assert_eq!(tuple, Value::Tuple(ints(&[1, 4, 9])));
    }

    #[test]
    fn empty_list_maps_to_empty_list() {
        let out = process_data(&Value::List(vec![]), square, "values").unwrap();
        assert_eq!(out, Value::List(vec![]));
    }

    #[test]
    fn values_mode_keeps_keys() {
        let out = process_data(&sample_map(), square, "values").unwrap();
        let expected = Mapping::from_iter([
            (Key::from("a"), Value::Int64(1)),
            (Key::from("b"), Value::Int64(4)),
        ]);
        assert_eq!(out, Value::Map(expected));
    }

    #[test]
    fn keys_mode_transforms_keys_only() {
        let out = process_data(&sample_map(), upper, "keys").unwrap();
        let map = out.as_map().unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("A"), Key::from("B")]);
        assert_eq!(map.get(&Key::from("B")), Some(&Value::Int64(2)));
    }

    #[test]
    fn both_mode_transforms_key_then_value() {
        let data = Value::Map(Mapping::from_iter([(Key::from("k"), Value::from("v"))]));
        let mut seen = Vec::new();
        let out = process_data(
            &data,
            |v| {
                seen.push(v.clone());
                upper(v)
            },
            "both",
        )
        .unwrap();

        assert_eq!(seen, vec![Value::from("k"), Value::from("v")]);
        assert_eq!(
            out,
            Value::Map(Mapping::from_iter([(Key::from("K"), Value::from("V"))]))
        );
    }

    #[test]
    fn invalid_mode_fails_for_maps_only() {
        let err = process_data(&sample_map(), square, "bogus").unwrap_err();
        assert_eq!(err.function, FunctionName::ProcessData);
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Error in process_data: Invalid dict_mode: bogus");

        let out = process_data(&Value::List(ints(&[1, 2, 3])), square, "bogus").unwrap();
        assert_eq!(out, Value::List(ints(&[1, 4, 9])));
    }

    #[test]
    fn scalar_input_is_unsupported() {
        let err = process_data(&Value::Int64(5), square, "values").unwrap_err();
        assert_eq!(err.error, ProcessingError::UnsupportedDataType);
        assert_eq!(
            err.to_string(),
            "Error in process_data: Unsupported data type. Use list, tuple, or dict."
        );
    }

    #[test]
    fn callback_error_stops_processing() {
        let data = Value::List(vec![Value::Int64(1), Value::from("x"), Value::Int64(3)]);
        let mut calls = 0;
        let err = process_data(
            &data,
            |v| {
                calls += 1;
                square(v)
            },
            "values",
        )
        .unwrap_err();

        assert_eq!(calls, 2);
        assert_eq!(err.kind(), ErrorKind::Callback);
        assert_eq!(err.to_string(), "Error in process_data: cannot square str");
    }

    #[test]
    fn colliding_keys_last_write_wins_by_default() {
        let data = Value::Map(Mapping::from_iter([
            (Key::from("a"), Value::Int64(1)),
            (Key::from("b"), Value::Int64(2)),
            (Key::from("c"), Value::Int64(3)),
        ]));
        let out = process_data(&data, |_| Ok::<_, CallbackError>(Value::from("same")), "keys")
            .unwrap();

        let map = out.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Key::from("same")), Some(&Value::Int64(3)));
    }

    #[test]
    fn colliding_keys_can_be_rejected() {
        let opts = ProcessOptions::default()
            .with_dict_mode(DictMode::Keys)
            .with_key_collisions(KeyCollisionPolicy::Reject);
        let err = process_data_with(
            &sample_map(),
            |_| Ok::<_, CallbackError>(Value::from("same")),
            &opts,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::KeyCollision);
        assert_eq!(
            err.to_string(),
            "Error in process_data: Duplicate key after transform: \"same\""
        );
    }

    #[test]
    fn reject_policy_allows_injective_transforms() {
        let opts = ProcessOptions::default()
            .with_dict_mode(DictMode::Keys)
            .with_key_collisions(KeyCollisionPolicy::Reject);
        let out = process_data_with(&sample_map(), upper, &opts).unwrap();
        assert_eq!(out.element_count(), Some(2));
    }

    #[test]
    fn unhashable_transformed_key_fails() {
        let err = process_data(
            &sample_map(),
            |v| Ok::<_, CallbackError>(Value::List(vec![v.clone()])),
            "keys",
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Error in process_data: unhashable type: 'list'");
    }

    #[test]
    fn float_keys_are_accepted() {
        let data = Value::Map(Mapping::from_iter([(Key::from("a"), Value::Int64(1))]));
        let out = process_data(&data, |_| Ok::<_, CallbackError>(Value::Float64(1.5)), "keys")
            .unwrap();
        assert_eq!(
            out,
            Value::Map(Mapping::from_iter([(Key::from(1.5), Value::Int64(1))]))
        );

        let data = Value::Map(Mapping::from_iter([
            (Key::Int64(1), Value::Int64(10)),
            (Key::Int64(2), Value::Int64(20)),
        ]));
        let halve = |v: &Value| {
            v.as_f64()
                .map(|x| Value::Float64(x / 2.0))
                .ok_or_else(|| CallbackError::from("expected a number"))
        };
        let out = process_data(&data, halve, "both").unwrap();
        let Value::Map(map) = out else {
            panic!("expected a map");
        };
        assert_eq!(map.get(&Key::from(0.5)), Some(&Value::Float64(5.0)));
        assert_eq!(map.get(&Key::from(1.0)), Some(&Value::Float64(10.0)));
    }

    #[test]
    fn input_is_left_untouched() {
        let data = Value::List(ints(&[1, 2]));
        let _ = process_data(&data, square, "values").unwrap();
        assert_eq!(data, Value::List(ints(&[1, 2])));
    }
}
