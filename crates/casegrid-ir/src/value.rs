use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A decoded candidate value, prior to conversion into a typed field.
///
/// Mirrors the JSON data model minus `null`: every candidate must be a
/// scalar, a sequence of values, or a string-keyed mapping of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DynValue {
    Bool(bool),
    Number(Number),
    String(String),
    Seq(Vec<DynValue>),
    Map(BTreeMap<String, DynValue>),
}

/// Numeric payload. Keeps track of whether the literal was integral so
/// integer destinations can reject fractional input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Structural category of a value, independent of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Sequence => write!(f, "sequence"),
            Shape::Mapping => write!(f, "mapping"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error("null is not a valid candidate value")]
    Null,
}

impl DynValue {
    pub fn shape(&self) -> Shape {
        match self {
            DynValue::Seq(_) => Shape::Sequence,
            DynValue::Map(_) => Shape::Mapping,
            DynValue::Bool(_) | DynValue::Number(_) | DynValue::String(_) => Shape::Scalar,
        }
    }

    /// Name of the runtime type, used in conversion error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DynValue::Bool(_) => "bool",
            DynValue::Number(_) => "number",
            DynValue::String(_) => "string",
            DynValue::Seq(_) => "sequence",
            DynValue::Map(_) => "mapping",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            DynValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[DynValue]> {
        match self {
            DynValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, DynValue>> {
        match self {
            DynValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Number {
    /// Lossless view as `i128`, if the number is integral.
    ///
    /// Floats count as integral when they have no fractional part and lie
    /// within the `i128` range.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Number::Int(i) => Some(i128::from(i)),
            Number::UInt(u) => Some(i128::from(u)),
            Number::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f >= i128::MIN as f64 && f < i128::MAX as f64 {
                    Some(f as i128)
                } else {
                    None
                }
            }
        }
    }

    /// Lossless view as `u128` (non-negative integral values only).
    pub fn as_u128(&self) -> Option<u128> {
        match *self {
            Number::UInt(u) => Some(u128::from(u)),
            Number::Int(i) => u128::try_from(i).ok(),
            Number::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < u128::MAX as f64 {
                    Some(f as u128)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Renders the value in literal (JSON) syntax.
impl fmt::Display for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            // Without arbitrary_precision every JSON number is one of the three.
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl TryFrom<serde_json::Value> for DynValue {
    type Error = ValueError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Err(ValueError::Null),
            serde_json::Value::Bool(b) => Ok(DynValue::Bool(b)),
            serde_json::Value::Number(n) => Ok(DynValue::Number(Number::from(&n))),
            serde_json::Value::String(s) => Ok(DynValue::String(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(DynValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(DynValue::Seq),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| DynValue::try_from(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(DynValue::Map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shapes() {
        assert_eq!(DynValue::Bool(true).shape(), Shape::Scalar);
        assert_eq!(DynValue::Seq(vec![]).shape(), Shape::Sequence);
        assert_eq!(DynValue::Map(BTreeMap::new()).shape(), Shape::Mapping);
    }

    #[test]
    fn test_from_json_keeps_integer_kinds() {
        let v = DynValue::try_from(json!([1, -2, 18446744073709551615u64, 1.5])).unwrap();
        let items = v.as_seq().unwrap();
        assert_eq!(items[0], DynValue::Number(Number::Int(1)));
        assert_eq!(items[1], DynValue::Number(Number::Int(-2)));
        assert_eq!(items[2], DynValue::Number(Number::UInt(u64::MAX)));
        assert_eq!(items[3], DynValue::Number(Number::Float(1.5)));
    }

    #[test]
    fn test_nested_null_rejected() {
        let result = DynValue::try_from(json!({"a": [1, null]}));
        assert!(matches!(result, Err(ValueError::Null)));
    }

    #[test]
    fn test_display_renders_json() {
        let v = DynValue::try_from(json!({"one": [1, 2], "flag": true})).unwrap();
        assert_eq!(v.to_string(), r#"{"flag":true,"one":[1,2]}"#);
        assert_eq!(DynValue::Number(Number::Float(2.5)).to_string(), "2.5");
        assert_eq!(DynValue::String("a\"b".into()).to_string(), r#""a\"b""#);
    }

    #[test]
    fn test_integral_float_views() {
        assert_eq!(Number::Float(3.0).as_i128(), Some(3));
        assert_eq!(Number::Float(3.5).as_i128(), None);
        assert_eq!(Number::Int(-1).as_u128(), None);
        assert_eq!(Number::UInt(7).as_u128(), Some(7));
    }
}
