//! Conversion between JSON values and the protobuf `Struct` wire form.

use openflag_core::EvaluationContext;
use prost_types::value::Kind;
use prost_types::{ListValue, NullValue, Struct, Value};
use std::collections::BTreeMap;

use crate::error::ContextError;

/// Protobuf message nesting the service will decode.
///
/// Counted the way the decoder does: the context `Struct` inside a request
/// is level 1, and every map entry, `Value`, `Struct` and `ListValue` below
/// it adds one level.
pub const MAX_DEPTH: usize = 100;

/// Convert an evaluation context into a protobuf `Struct`.
pub fn context_to_struct(context: &EvaluationContext) -> Result<Struct, ContextError> {
    let fields = context
        .iter()
        .map(|(key, value)| Ok((key.clone(), entry_value(key, value, 1)?)))
        .collect::<Result<BTreeMap<_, _>, ContextError>>()?;

    Ok(Struct { fields })
}

/// Convert the value of a map entry held by a `Struct` at `depth`.
fn entry_value(key: &str, value: &serde_json::Value, depth: usize) -> Result<Value, ContextError> {
    enter(key, depth + 1)?;
    to_value(key, value, depth + 2)
}

fn enter(key: &str, depth: usize) -> Result<(), ContextError> {
    if depth > MAX_DEPTH {
        return Err(ContextError::TooDeep {
            key: key.to_string(),
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}

fn to_value(key: &str, value: &serde_json::Value, depth: usize) -> Result<Value, ContextError> {
    enter(key, depth)?;

    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(NullValue::NullValue as i32),
        serde_json::Value::Bool(b) => Kind::BoolValue(*b),
        serde_json::Value::String(s) => Kind::StringValue(s.clone()),
        // Only numbers kept as text by `arbitrary_precision` can overflow a double
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => Kind::NumberValue(f),
            _ => {
                return Err(ContextError::UnrepresentableNumber {
                    key: key.to_string(),
                    number: n.to_string(),
                });
            }
        },
        serde_json::Value::Array(items) => {
            enter(key, depth + 1)?;
            Kind::ListValue(ListValue {
                values: items
                    .iter()
                    .map(|item| to_value(key, item, depth + 2))
                    .collect::<Result<Vec<_>, _>>()?,
            })
        }
        serde_json::Value::Object(map) => {
            enter(key, depth + 1)?;
            Kind::StructValue(Struct {
                fields: map
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), entry_value(key, v, depth + 1)?)))
                    .collect::<Result<BTreeMap<_, _>, ContextError>>()?,
            })
        }
    };

    Ok(Value { kind: Some(kind) })
}

/// Convert a protobuf `Struct` into a JSON object.
pub fn struct_to_json(value: Struct) -> serde_json::Value {
    serde_json::Value::Object(
        value
            .fields
            .into_iter()
            .map(|(k, v)| (k, value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(value: Value) -> serde_json::Value {
    match value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        // Non-finite doubles have no JSON form
        Some(Kind::NumberValue(n)) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => struct_to_json(s),
    }
}
