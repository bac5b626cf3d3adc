use prost_types::Timestamp;
use serde_json::{Map, Value};

use crate::grpc_proto::{descriptor_pool, PACKAGE};
use crate::grpc_proto::invest::Quotation;
use crate::tool_api::error::ToolCallError;

pub struct ToolArgs<'a> {
    tool: &'a str,
    values: &'a Map<String, Value>,
}

impl<'a> ToolArgs<'a> {
    pub fn new(tool: &'a str, values: &'a Map<String, Value>) -> Self {
        Self { tool, values }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name).filter(|value| !value.is_null())
    }

    fn invalid(&self, name: &str, reason: impl Into<String>) -> ToolCallError {
        ToolCallError::invalid_argument(self.tool, name, reason)
    }

    fn require(&self, name: &str) -> Result<&'a Value, ToolCallError> {
        self.present(name)
            .ok_or_else(|| self.invalid(name, "missing required parameter"))
    }

    pub fn string(&self, name: &str) -> Result<String, ToolCallError> {
        let value = self.require(name)?;
        self.coerce_string(name, value)
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>, ToolCallError> {
        self.present(name)
            .map(|value| self.coerce_string(name, value))
            .transpose()
    }

    pub fn int64(&self, name: &str) -> Result<i64, ToolCallError> {
        let value = self.require(name)?;
        self.coerce_i64(name, value)
    }

    pub fn opt_int64(&self, name: &str) -> Result<Option<i64>, ToolCallError> {
        self.present(name)
            .map(|value| self.coerce_i64(name, value))
            .transpose()
    }

    pub fn int32(&self, name: &str) -> Result<i32, ToolCallError> {
        let value = self.require(name)?;
        self.coerce_i32(name, value)
    }

    pub fn opt_int32(&self, name: &str) -> Result<Option<i32>, ToolCallError> {
        self.present(name)
            .map(|value| self.coerce_i32(name, value))
            .transpose()
    }

    pub fn timestamp(&self, name: &str) -> Result<Timestamp, ToolCallError> {
        self.int64(name).map(epoch_seconds)
    }

    pub fn opt_timestamp(&self, name: &str) -> Result<Option<Timestamp>, ToolCallError> {
        Ok(self.opt_int64(name)?.map(epoch_seconds))
    }

    pub fn enumeration(&self, name: &str, enum_name: &str) -> Result<i32, ToolCallError> {
        let value = self.require(name)?;
        self.coerce_enum(name, enum_name, value)
    }

    pub fn opt_enumeration(
        &self,
        name: &str,
        enum_name: &str,
    ) -> Result<Option<i32>, ToolCallError> {
        self.present(name)
            .map(|value| self.coerce_enum(name, enum_name, value))
            .transpose()
    }

    pub fn string_list(&self, name: &str) -> Result<Vec<String>, ToolCallError> {
        match self.require(name)? {
            Value::Array(items) => items
                .iter()
                .map(|item| self.coerce_string(name, item))
                .collect(),
            single @ Value::String(_) => Ok(vec![self.coerce_string(name, single)?]),
            other => Err(self.invalid(
                name,
                format!("expected an array of strings, got {}", type_name(other)),
            )),
        }
    }

    /// `Quotation` from `(units, nano)`, or `None` unless both are present.
    pub fn quotation(&self, units: &str, nano: &str) -> Result<Option<Quotation>, ToolCallError> {
        let units = self.opt_int64(units)?;
        let nano = self.opt_int32(nano)?;
        Ok(match (units, nano) {
            (Some(units), Some(nano)) => Some(Quotation { units, nano }),
            _ => None,
        })
    }

    fn coerce_string(&self, name: &str, value: &Value) -> Result<String, ToolCallError> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(self.invalid(
                name,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    fn coerce_i64(&self, name: &str, value: &Value) -> Result<i64, ToolCallError> {
        match value {
            Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| self.invalid(name, format!("expected an integer, got {number}"))),
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| self.invalid(name, format!("expected an integer, got \"{text}\""))),
            other => Err(self.invalid(
                name,
                format!("expected an integer, got {}", type_name(other)),
            )),
        }
    }

    fn coerce_i32(&self, name: &str, value: &Value) -> Result<i32, ToolCallError> {
        let wide = self.coerce_i64(name, value)?;
        i32::try_from(wide)
            .map_err(|_| self.invalid(name, format!("{wide} does not fit in a 32-bit integer")))
    }

    fn coerce_enum(&self, name: &str, enum_name: &str, value: &Value) -> Result<i32, ToolCallError> {
        if let Value::Number(_) = value {
            return self.coerce_i32(name, value);
        }

        let Value::String(text) = value else {
            return Err(self.invalid(
                name,
                format!("expected an enum value name, got {}", type_name(value)),
            ));
        };
        if let Ok(number) = text.trim().parse::<i32>() {
            return Ok(number);
        }

        let values = enum_values(enum_name).map_err(ToolCallError::Serialization)?;
        let wanted = text.trim().to_ascii_uppercase();
        let prefix = format!("{}_", screaming_snake(short_name(enum_name)));
        values
            .iter()
            .find(|(candidate, _)| {
                *candidate == wanted || candidate.strip_prefix(&prefix) == Some(wanted.as_str())
            })
            .map(|(_, number)| *number)
            .ok_or_else(|| {
                let names: Vec<&str> = values.iter().map(|(name, _)| name.as_str()).collect();
                self.invalid(
                    name,
                    format!("unknown value \"{text}\"; expected one of {}", names.join(", ")),
                )
            })
    }
}

pub fn enum_values(enum_name: &str) -> Result<Vec<(String, i32)>, String> {
    let pool = descriptor_pool()?;
    let descriptor = pool
        .get_enum_by_name(&format!("{PACKAGE}.{enum_name}"))
        .ok_or_else(|| format!("Unknown enum {enum_name}"))?;
    Ok(descriptor
        .values()
        .map(|value| (value.name().to_string(), value.number()))
        .collect())
}

fn epoch_seconds(seconds: i64) -> Timestamp {
    Timestamp { seconds, nanos: 0 }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && idx > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_uppercase());
    }
    out
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
