use prost_reflect::{DynamicMessage, SerializeOptions, Value as ReflectValue};
use serde_json::Value;

use crate::grpc_proto::{descriptor_pool, StructuredMessage};
use crate::tool_api::error::ToolCallError;

#[derive(Debug)]
pub enum ToolValue {
    Message(Box<dyn StructuredMessage>),
    Plain(Value),
}

pub fn render(value: Option<&ToolValue>) -> Result<String, ToolCallError> {
    match value {
        None => Ok("null".to_string()),
        Some(ToolValue::Message(message)) => render_message(message.as_ref()),
        Some(ToolValue::Plain(plain)) => serde_json::to_string_pretty(plain)
            .map_err(|err| ToolCallError::Serialization(err.to_string())),
    }
}

fn render_message(message: &dyn StructuredMessage) -> Result<String, ToolCallError> {
    let dynamic = to_dynamic(message)?;
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::pretty(&mut out);
    dynamic
        .serialize_with_options(&mut serializer, &serialize_options())
        .map_err(|err| {
            ToolCallError::Serialization(format!("{}: {err}", message.message_name()))
        })?;
    String::from_utf8(out).map_err(|err| ToolCallError::Serialization(err.to_string()))
}

pub fn project_repeated(
    message: &dyn StructuredMessage,
    field: &str,
) -> Result<Value, ToolCallError> {
    let dynamic = to_dynamic(message)?;
    let Some(value) = dynamic.get_field_by_name(field) else {
        return Err(ToolCallError::Serialization(format!(
            "{} has no field '{field}'",
            message.message_name()
        )));
    };

    let ReflectValue::List(items) = &*value else {
        return Err(ToolCallError::Serialization(format!(
            "{}.{field} is not a repeated field",
            message.message_name()
        )));
    };

    items
        .iter()
        .map(|item| match item {
            ReflectValue::Message(element) => message_value(element),
            _ => Err(ToolCallError::Serialization(format!(
                "{}.{field} does not hold messages",
                message.message_name()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn message_value(message: &DynamicMessage) -> Result<Value, ToolCallError> {
    message
        .serialize_with_options(serde_json::value::Serializer, &serialize_options())
        .map_err(|err| ToolCallError::Serialization(err.to_string()))
}

fn to_dynamic(message: &dyn StructuredMessage) -> Result<DynamicMessage, ToolCallError> {
    let pool = descriptor_pool().map_err(ToolCallError::Serialization)?;
    let descriptor = pool
        .get_message_by_name(message.message_name())
        .ok_or_else(|| {
            ToolCallError::Serialization(format!(
                "No descriptor for message {}",
                message.message_name()
            ))
        })?;
    let bytes = message.encode_message();
    DynamicMessage::decode(descriptor, bytes.as_slice()).map_err(|err| {
        ToolCallError::Serialization(format!(
            "Failed to decode {}: {err}",
            message.message_name()
        ))
    })
}

// Proto field names, defaults included, 64-bit integers as JSON numbers.
fn serialize_options() -> SerializeOptions {
    SerializeOptions::new()
        .skip_default_fields(false)
        .use_proto_field_name(true)
        .stringify_64_bit_integers(false)
}
