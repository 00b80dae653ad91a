//! JSON documents via `serde_json`.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{CodecError, DocumentCodec, EncodeOptions};
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        let json: serde_json::Value = serde_json::from_slice(input)?;
        json_to_value(json)
    }

    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, CodecError> {
        let json = value_to_json(value);
        if options.inline_tables {
            return Ok(serde_json::to_string(&json)?);
        }

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(options.indent_symbol.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        json.serialize(&mut serializer)?;
        Ok(String::from_utf8(buffer).map_err(|e| e.utf8_error())?)
    }
}

/// Convert serde_json::Value to a document value
pub fn json_to_value(v: serde_json::Value) -> Result<Value, CodecError> {
    Ok(match v {
        serde_json::Value::Null => {
            return Err(CodecError::Unsupported {
                format: "JSON",
                message: "null has no document value".to_string(),
            });
        }
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(obj) => Value::Table(
            obj.into_iter()
                .map(|(k, v)| json_to_value(v).map(|v| (k, v)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

/// Convert a document value to serde_json::Value
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Datetime(d) => serde_json::Value::String(d.to_string()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Table(table) => serde_json::Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}
