use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A planet as stored in the `planets` collection.
///
/// Every field is optional: the source file is not validated for presence,
/// and absent fields are simply left out of the stored document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlanetRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    // Unit-bearing display text, e.g. "29.8 km/s".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),
    #[error("cast to string failed for field `{field}` (found {found})")]
    NotText { field: &'static str, found: &'static str },
    #[error("cast to number failed for field `{field}` (value {value})")]
    NotInteger { field: &'static str, value: String },
}

impl PlanetRecord {
    /// Applies the collection schema to a raw source element.
    ///
    /// Unknown keys are dropped and `null` is treated as absent. Scalars are
    /// cast to the field type where the cast is lossless.
    pub fn coerce(raw: &Value) -> Result<Self, CoercionError> {
        let object = match raw {
            Value::Object(object) => object,
            other => return Err(CoercionError::NotAnObject(type_name(other))),
        };

        Ok(Self {
            name: text_field(object, "name")?,
            id: integer_field(object, "id")?,
            description: text_field(object, "description")?,
            image: text_field(object, "image")?,
            velocity: text_field(object, "velocity")?,
            distance: text_field(object, "distance")?,
        })
    }

    /// `ID: 3, Name: Earth`, with `undefined` standing in for missing fields.
    pub fn summary(&self) -> String {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| String::from("undefined"));
        let name = self.name.as_deref().unwrap_or("undefined");
        format!("ID: {}, Name: {}", id, name)
    }
}

fn text_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, CoercionError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(CoercionError::NotText {
            field,
            found: type_name(other),
        }),
    }
}

fn integer_field(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, CoercionError> {
    let value = match object.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        }
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    };

    parsed.map(Some).ok_or_else(|| CoercionError::NotInteger {
        field,
        value: value.to_string(),
    })
}

fn integral(float: f64) -> Option<i64> {
    (float.fract() == 0.0 && float.abs() < i64::MAX as f64).then_some(float as i64)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
