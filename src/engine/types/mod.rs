use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    String,
    Long,
    Double,
    Bool,
    Timestamp,
    StringArray,
    LongArray,
    DoubleArray,
    BoolArray,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "STRING",
            ValueType::Long => "LONG",
            ValueType::Double => "DOUBLE",
            ValueType::Bool => "BOOL",
            ValueType::Timestamp => "TIMESTAMP",
            ValueType::StringArray => "STRING_ARRAY",
            ValueType::LongArray => "LONG_ARRAY",
            ValueType::DoubleArray => "DOUBLE_ARRAY",
            ValueType::BoolArray => "BOOL_ARRAY",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            ValueType::StringArray
                | ValueType::LongArray
                | ValueType::DoubleArray
                | ValueType::BoolArray
        )
    }

    /// Scalar type held by an array type, `None` for scalars.
    pub fn element_type(&self) -> Option<ValueType> {
        match self {
            ValueType::StringArray => Some(ValueType::String),
            ValueType::LongArray => Some(ValueType::Long),
            ValueType::DoubleArray => Some(ValueType::Double),
            ValueType::BoolArray => Some(ValueType::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed literal as it travels in filters and result rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "value_type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Value {
    String(String),
    Long(i64),
    Double(f64),
    Bool(bool),
    Timestamp(i64),
    StringArray(Vec<String>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
}

impl Value {
    /// Builds a STRING_ARRAY, collapsing duplicates while keeping first-seen order.
    pub fn string_array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: IndexSet<String> = values.into_iter().map(Into::into).collect();
        Value::StringArray(unique.into_iter().collect())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Long(_) => ValueType::Long,
            Value::Double(_) => ValueType::Double,
            Value::Bool(_) => ValueType::Bool,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::StringArray(_) => ValueType::StringArray,
            Value::LongArray(_) => ValueType::LongArray,
            Value::DoubleArray(_) => ValueType::DoubleArray,
            Value::BoolArray(_) => ValueType::BoolArray,
        }
    }

    pub fn is_array(&self) -> bool {
        self.value_type().is_array()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(i) | Value::Timestamp(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            Value::Long(i) | Value::Timestamp(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String form of a scalar, used when group values are turned into IN-clause members.
    /// Arrays have no single string form.
    pub fn to_string_value(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Long(i) | Value::Timestamp(i) => Some(i.to_string()),
            Value::Double(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Long(i) | Value::Timestamp(i) => JsonValue::Number(Number::from(*i)),
            Value::Double(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::StringArray(v) => JsonValue::from(v.clone()),
            Value::LongArray(v) => JsonValue::from(v.clone()),
            Value::DoubleArray(v) => JsonValue::Array(
                v.iter()
                    .map(|f| {
                        Number::from_f64(*f)
                            .map(JsonValue::Number)
                            .unwrap_or(JsonValue::Null)
                    })
                    .collect(),
            ),
            Value::BoolArray(v) => JsonValue::from(v.clone()),
        }
    }

    /// Orders two values of compatible types.
    ///
    /// Numeric types (LONG, DOUBLE, TIMESTAMP) compare by magnitude across each other,
    /// strings and bools compare naturally. Anything else falls back to the JSON text form.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b))
            | (Value::Timestamp(a), Value::Timestamp(b))
            | (Value::Long(a), Value::Timestamp(b))
            | (Value::Timestamp(a), Value::Long(b)) => a.cmp(b),
            _ => {
                if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                    return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                }
                self.to_json().to_string().cmp(&other.to_json().to_string())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    Value::Long(i)
                } else if let Some(f) = num.as_f64() {
                    Value::Double(f)
                } else {
                    Value::String(num.to_string())
                }
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                if items.iter().all(JsonValue::is_string) {
                    Value::StringArray(
                        items
                            .into_iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect(),
                    )
                } else if items.iter().all(JsonValue::is_i64) {
                    Value::LongArray(items.iter().filter_map(JsonValue::as_i64).collect())
                } else if items.iter().all(JsonValue::is_number) {
                    Value::DoubleArray(items.iter().filter_map(JsonValue::as_f64).collect())
                } else if items.iter().all(JsonValue::is_boolean) {
                    Value::BoolArray(items.iter().filter_map(JsonValue::as_bool).collect())
                } else {
                    Value::String(JsonValue::Array(items).to_string())
                }
            }
            // Objects and nulls have no typed literal; keep their text form
            other => Value::String(other.to_string()),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}
