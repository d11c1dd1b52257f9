//! Conversion between [`TypedValue`] and its `{type, value}` JSON envelope.
//!
//! Encoding is permissive: a value JSON cannot carry yields `None` and the
//! caller skips that key. Decoding is strict: anything outside the six tags,
//! or a payload that does not match its tag, is an error.

use std::collections::BTreeSet;

use prefport_model::{TypedValue, ValueKind};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::DecodeError;

/// Field holding the wire tag.
pub const TYPE_FIELD: &str = "type";
/// Field holding the payload.
pub const VALUE_FIELD: &str = "value";

/// Encoded form of a single preference value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub value: Value,
}

impl Envelope {
    /// Convert to a plain JSON object.
    pub fn into_json(self) -> Value {
        let mut object = Map::new();
        object.insert(TYPE_FIELD.to_string(), Value::String(self.kind.tag().to_string()));
        object.insert(VALUE_FIELD.to_string(), self.value);
        Value::Object(object)
    }
}

/// Encode a value.
///
/// Floats are widened to `f64`. Returns `None` for non-finite floats, which
/// JSON cannot represent.
pub fn encode(value: &TypedValue) -> Option<Envelope> {
    let payload = match value {
        TypedValue::Boolean(b) => Value::Bool(*b),
        TypedValue::Int(i) => Value::from(*i),
        TypedValue::Long(l) => Value::from(*l),
        TypedValue::Float(f) => Value::Number(Number::from_f64(f64::from(*f))?),
        TypedValue::String(s) => Value::String(s.clone()),
        TypedValue::StringSet(set) => {
            Value::Array(set.iter().cloned().map(Value::String).collect())
        }
    };
    Some(Envelope {
        kind: value.kind(),
        value: payload,
    })
}

/// Decode an envelope.
pub fn decode(envelope: &Value) -> Result<TypedValue, DecodeError> {
    let object = envelope.as_object().ok_or(DecodeError::NotAnObject)?;

    let tag = match object.get(TYPE_FIELD) {
        Some(Value::String(tag)) if !tag.is_empty() => tag,
        _ => return Err(DecodeError::MissingType),
    };
    let kind = ValueKind::from_tag(tag).ok_or_else(|| DecodeError::UnknownType(tag.clone()))?;

    let payload = object.get(VALUE_FIELD).ok_or(DecodeError::MissingValue)?;
    decode_payload(kind, payload)
}

fn decode_payload(kind: ValueKind, payload: &Value) -> Result<TypedValue, DecodeError> {
    let wrong_shape = DecodeError::WrongShape { expected: kind };
    let out_of_range = DecodeError::OutOfRange { kind };

    match kind {
        ValueKind::Boolean => payload
            .as_bool()
            .map(TypedValue::Boolean)
            .ok_or(wrong_shape),
        ValueKind::Int => {
            let wide = integer(payload, kind)?;
            i32::try_from(wide)
                .map(TypedValue::Int)
                .map_err(|_| out_of_range)
        }
        ValueKind::Long => integer(payload, kind).map(TypedValue::Long),
        ValueKind::Float => {
            let wide = payload.as_f64().ok_or(wrong_shape)?;
            #[allow(clippy::cast_possible_truncation)]
            let narrow = wide as f32;
            if narrow.is_finite() {
                Ok(TypedValue::Float(narrow))
            } else {
                Err(out_of_range)
            }
        }
        ValueKind::String => payload
            .as_str()
            .map(|s| TypedValue::String(s.to_string()))
            .ok_or(wrong_shape),
        ValueKind::StringSet => {
            let items = payload.as_array().ok_or(wrong_shape)?;
            let mut members = BTreeSet::new();
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => {
                        members.insert(s.clone());
                    }
                    Value::Null => return Err(DecodeError::NullMember { index }),
                    _ => return Err(DecodeError::NonStringMember { index }),
                }
            }
            Ok(TypedValue::StringSet(members))
        }
    }
}

/// Read an integral JSON number. Fractional numbers are rejected.
fn integer(payload: &Value, kind: ValueKind) -> Result<i64, DecodeError> {
    match payload {
        Value::Number(n) if n.is_i64() => n.as_i64().ok_or(DecodeError::OutOfRange { kind }),
        Value::Number(n) if n.is_u64() => Err(DecodeError::OutOfRange { kind }),
        _ => Err(DecodeError::WrongShape { expected: kind }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_boolean() {
        let envelope = encode(&TypedValue::Boolean(true)).unwrap();
        assert_eq!(envelope.into_json(), json!({"type": "boolean", "value": true}));
    }

    #[test]
    fn test_encode_float_widens() {
        let envelope = encode(&TypedValue::Float(0.25)).unwrap();
        assert_eq!(envelope.kind, ValueKind::Float);
        assert_eq!(envelope.value.as_f64(), Some(0.25));
    }

    #[test]
    fn test_encode_non_finite_float_is_unsupported() {
        assert!(encode(&TypedValue::Float(f32::NAN)).is_none());
        assert!(encode(&TypedValue::Float(f32::INFINITY)).is_none());
    }

    #[test]
    fn test_encode_string_set_as_array() {
        let envelope = encode(&TypedValue::string_set(["fr", "de"])).unwrap();
        assert_eq!(
            envelope.into_json(),
            json!({"type": "string_set", "value": ["de", "fr"]})
        );
    }

    #[test]
    fn test_envelope_serializes_like_into_json() {
        let envelope = encode(&TypedValue::Long(1 << 40)).unwrap();
        let via_serde = serde_json::to_value(&envelope).unwrap();
        assert_eq!(via_serde, envelope.into_json());
    }

    #[test]
    fn test_decode_each_kind() {
        assert_eq!(
            decode(&json!({"type": "boolean", "value": false})),
            Ok(TypedValue::Boolean(false))
        );
        assert_eq!(
            decode(&json!({"type": "int", "value": -12})),
            Ok(TypedValue::Int(-12))
        );
        assert_eq!(
            decode(&json!({"type": "long", "value": 1_700_000_000_000_i64})),
            Ok(TypedValue::Long(1_700_000_000_000))
        );
        assert_eq!(
            decode(&json!({"type": "float", "value": 1.5})),
            Ok(TypedValue::Float(1.5))
        );
        assert_eq!(
            decode(&json!({"type": "float", "value": 3})),
            Ok(TypedValue::Float(3.0))
        );
        assert_eq!(
            decode(&json!({"type": "string", "value": "gpt"})),
            Ok(TypedValue::String("gpt".to_string()))
        );
        assert_eq!(
            decode(&json!({"type": "string_set", "value": ["en", "en", "de"]})),
            Ok(TypedValue::string_set(["de", "en"]))
        );
    }

    #[test]
    fn test_decode_requires_type() {
        assert_eq!(
            decode(&json!({"value": true})),
            Err(DecodeError::MissingType)
        );
        assert_eq!(
            decode(&json!({"type": "", "value": true})),
            Err(DecodeError::MissingType)
        );
        assert_eq!(
            decode(&json!({"type": 4, "value": true})),
            Err(DecodeError::MissingType)
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        assert_eq!(
            decode(&json!({"type": "double", "value": 1.0})),
            Err(DecodeError::UnknownType("double".to_string()))
        );
    }

    #[test]
    fn test_decode_rejects_mismatched_payload() {
        assert_eq!(
            decode(&json!({"type": "boolean", "value": "true"})),
            Err(DecodeError::WrongShape {
                expected: ValueKind::Boolean
            })
        );
        assert_eq!(
            decode(&json!({"type": "int", "value": 1.5})),
            Err(DecodeError::WrongShape {
                expected: ValueKind::Int
            })
        );
        assert_eq!(
            decode(&json!({"type": "string", "value": null})),
            Err(DecodeError::WrongShape {
                expected: ValueKind::String
            })
        );
        assert_eq!(
            decode(&json!({"type": "long"})),
            Err(DecodeError::MissingValue)
        );
    }

    #[test]
    fn test_decode_int_out_of_range() {
        assert_eq!(
            decode(&json!({"type": "int", "value": 3_000_000_000_i64})),
            Err(DecodeError::OutOfRange {
                kind: ValueKind::Int
            })
        );
        assert_eq!(
            decode(&json!({"type": "long", "value": u64::MAX})),
            Err(DecodeError::OutOfRange {
                kind: ValueKind::Long
            })
        );
        assert_eq!(
            decode(&json!({"type": "float", "value": 1e300})),
            Err(DecodeError::OutOfRange {
                kind: ValueKind::Float
            })
        );
    }

    #[test]
    fn test_decode_string_set_members_must_be_strings() {
        assert_eq!(
            decode(&json!({"type": "string_set", "value": ["en", null]})),
            Err(DecodeError::NullMember { index: 1 })
        );
        assert_eq!(
            decode(&json!({"type": "string_set", "value": ["en", 5]})),
            Err(DecodeError::NonStringMember { index: 1 })
        );
        assert_eq!(
            decode(&json!({"type": "string_set", "value": "en"})),
            Err(DecodeError::WrongShape {
                expected: ValueKind::StringSet
            })
        );
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert_eq!(decode(&json!(true)), Err(DecodeError::NotAnObject));
    }
}
