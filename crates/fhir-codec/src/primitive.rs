//! Primitive values and their out-of-band `id`/`extension` sidecar.
//!
//! A [`PrimitiveValue`] tracks three independently optional parts: the bare
//! value, the element id and the extension list. This gives the three states
//! the wire formats distinguish:
//!
//! | State | JSON | XML |
//! |-------|------|-----|
//! | absent | no member | no element |
//! | value only | `"birthDate": "1974-12-25"` | `<birthDate value="1974-12-25"/>` |
//! | value + sidecar | `"birthDate": "1974-12-25", "_birthDate": {"id": "a1"}` | `<birthDate id="a1" value="1974-12-25"/>` |
//! | sidecar only | `"_birthDate": {"id": "a1"}` | `<birthDate id="a1"/>` |

use std::fmt;

use serde_json::{Number, Value};

use crate::model::Extension;

/// Why a scalar could not be converted to or from its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    pub expected: &'static str,
    pub found: String,
}

impl ValueError {
    fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

/// A scalar type that can sit inside a [`PrimitiveValue`].
///
/// JSON carries the value as a native JSON scalar; XML carries it in the
/// `value` attribute as its lexical form.
pub trait Primitive: Clone + fmt::Debug + PartialEq {
    fn to_json(&self) -> Result<Value, ValueError>;

    fn from_json(value: &Value) -> Result<Self, ValueError>;

    fn to_lexical(&self) -> Result<String, ValueError>;

    fn from_lexical(text: &str) -> Result<Self, ValueError>;
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

impl Primitive for bool {
    fn to_json(&self) -> Result<Value, ValueError> {
        Ok(Value::Bool(*self))
    }

    fn from_json(value: &Value) -> Result<Self, ValueError> {
        value
            .as_bool()
            .ok_or_else(|| ValueError::new("boolean", describe(value)))
    }

    fn to_lexical(&self) -> Result<String, ValueError> {
        Ok(self.to_string())
    }

    fn from_lexical(text: &str) -> Result<Self, ValueError> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ValueError::new("boolean", format!("'{other}'"))),
        }
    }
}

macro_rules! integer_primitive {
    ($ty:ty, $expected:literal) => {
        impl Primitive for $ty {
            fn to_json(&self) -> Result<Value, ValueError> {
                Ok(Value::Number(Number::from(*self)))
            }

            fn from_json(value: &Value) -> Result<Self, ValueError> {
                value
                    .as_i64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| ValueError::new($expected, describe(value)))
            }

            fn to_lexical(&self) -> Result<String, ValueError> {
                Ok(self.to_string())
            }

            fn from_lexical(text: &str) -> Result<Self, ValueError> {
                text.parse::<$ty>()
                    .map_err(|_| ValueError::new($expected, format!("'{text}'")))
            }
        }
    };
}

integer_primitive!(i32, "integer");
integer_primitive!(u32, "unsigned integer");

/// `decimal` values. Non-finite numbers have no wire form.
impl Primitive for f64 {
    fn to_json(&self) -> Result<Value, ValueError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| ValueError::new("finite decimal", self.to_string()))
    }

    fn from_json(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ValueError::new("decimal", describe(value))),
            _ => Err(ValueError::new("decimal", describe(value))),
        }
    }

    fn to_lexical(&self) -> Result<String, ValueError> {
        if self.is_finite() {
            Ok(self.to_string())
        } else {
            Err(ValueError::new("finite decimal", self.to_string()))
        }
    }

    fn from_lexical(text: &str) -> Result<Self, ValueError> {
        text.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ValueError::new("decimal", format!("'{text}'")))
    }
}

/// Every string-shaped type: string, code, id, uri, url, canonical, oid,
/// uuid, markdown, base64Binary, date, dateTime, instant, time.
impl Primitive for String {
    fn to_json(&self) -> Result<Value, ValueError> {
        Ok(Value::String(self.clone()))
    }

    fn from_json(value: &Value) -> Result<Self, ValueError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ValueError::new("string", describe(value)))
    }

    fn to_lexical(&self) -> Result<String, ValueError> {
        Ok(self.clone())
    }

    fn from_lexical(text: &str) -> Result<Self, ValueError> {
        Ok(text.to_string())
    }
}

/// A primitive element: optional value plus optional `id` and extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveValue<T> {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub value: Option<T>,
}

impl<T> Default for PrimitiveValue<T> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<T> From<T> for PrimitiveValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> PrimitiveValue<T> {
    /// A primitive carrying only a value.
    pub fn new(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A primitive with no value, id or extensions.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// True when the `id`/`extension` sidecar has anything to carry.
    pub fn has_sidecar(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }

    /// True when nothing at all is populated; such a value is never written.
    pub fn is_empty(&self) -> bool {
        !self.has_value() && !self.has_sidecar()
    }

    /// Collapse an all-absent value to `None`.
    pub fn into_present(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}
