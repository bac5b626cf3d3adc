use serde_json::{json, Map, Value};

use crate::tool_api::args::enum_values;
use crate::tool_api::catalog::{ParamKind, ParamSpec, Presence, ToolSpec};
use crate::tool_api::error::ToolCallError;

pub fn input_schema(tool: &ToolSpec) -> Result<Value, String> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &tool.params {
        properties.insert(param.name.to_string(), property_schema(param)?);
        if param.is_required() {
            required.push(Value::String(param.name.to_string()));
        }
    }

    Ok(json!({
        "type": "object",
        "properties": properties,
        "required": required,
    }))
}

fn property_schema(param: &ParamSpec) -> Result<Value, String> {
    let mut description = match param.presence {
        Presence::Grouped(group) => format!(
            "{} Part of the '{group}' group: applied only when every member of the group is supplied.",
            param.description
        ),
        Presence::Required | Presence::Optional => param.description.to_string(),
    };

    let mut schema = match param.kind {
        ParamKind::String => json!({"type": "string"}),
        ParamKind::Int64 => json!({"type": "integer"}),
        ParamKind::Int32 => json!({
            "type": "integer",
            "minimum": i32::MIN,
            "maximum": i32::MAX,
        }),
        ParamKind::EpochSeconds => json!({"type": "integer", "format": "unix-seconds"}),
        ParamKind::Enum(enum_name) => {
            let names: Vec<String> = enum_values(enum_name)?
                .into_iter()
                .map(|(name, _)| name)
                .collect();
            description.push_str(
                " Accepts a value name (case-insensitive), the name without its shared prefix, or the enum number.",
            );
            json!({"type": ["string", "integer"], "examples": names})
        }
        ParamKind::StringList => json!({"type": "array", "items": {"type": "string"}}),
    };

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("description".to_string(), Value::String(description));
    }
    Ok(schema)
}

pub fn validate_required(
    tool_name: &str,
    schema: &Value,
    args: &Map<String, Value>,
) -> Result<(), ToolCallError> {
    if !is_object_schema(schema) {
        return Ok(());
    }

    let Some(required) = schema.get("required").and_then(Value::as_array) else {
        return Ok(());
    };

    for key_value in required {
        let Some(key) = key_value.as_str() else {
            continue;
        };
        if args.get(key).map_or(true, Value::is_null) {
            return Err(ToolCallError::invalid_argument(
                tool_name,
                key,
                "missing required parameter",
            ));
        }
    }

    Ok(())
}

fn is_object_schema(schema: &Value) -> bool {
    let Some(schema_obj) = schema.as_object() else {
        return false;
    };

    match schema_obj.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(_) => false,
        None => schema_obj.contains_key("properties") || schema_obj.contains_key("required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grpc_proto::invest;
    use crate::invest::RpcCall;
    use crate::tool_api::args::ToolArgs;
    use crate::tool_api::catalog::Profile;

    fn build(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
        Ok(RpcCall::GetBrands(invest::GetBrandsRequest::default()))
    }

    fn sample_tool() -> ToolSpec {
        ToolSpec::new("sample", Profile::Read, "Sample tool.", build).params([
            ParamSpec::required("accountId", ParamKind::String, "Account identifier."),
            ParamSpec::required(
                "direction",
                ParamKind::Enum("OrderDirection"),
                "Direction.",
            ),
            ParamSpec::grouped("priceUnits", ParamKind::Int64, "price", "Integer part."),
            ParamSpec::optional("cursor", ParamKind::String, "Cursor."),
        ])
    }

    #[test]
    fn input_schema_lists_required_and_enum_values() {
        let schema = input_schema(&sample_tool()).expect("schema");
        assert_eq!(schema["required"], json!(["accountId", "direction"]));
        assert_eq!(
            schema.pointer("/properties/direction/examples"),
            Some(&json!([
                "ORDER_DIRECTION_UNSPECIFIED",
                "ORDER_DIRECTION_BUY",
                "ORDER_DIRECTION_SELL"
            ]))
        );
        let grouped = schema
            .pointer("/properties/priceUnits/description")
            .and_then(Value::as_str)
            .expect("description");
        assert!(grouped.contains("'price' group"));
    }

    #[test]
    fn enum_schema_admits_short_names_and_numbers() {
        let schema = input_schema(&sample_tool()).expect("schema");
        let direction = &schema["properties"]["direction"];
        assert!(direction.get("enum").is_none());
        assert_eq!(direction["type"], json!(["string", "integer"]));
        let description = direction["description"].as_str().expect("description");
        assert!(description.contains("without its shared prefix"), "{description}");
        assert!(description.contains("enum number"), "{description}");
    }

    #[test]
    fn validate_required_reports_missing_key() {
        let schema = input_schema(&sample_tool()).expect("schema");
        let args = json!({"accountId": "acc-1", "direction": null});
        let err = validate_required("sample", &schema, args.as_object().expect("object"))
            .expect_err("expected missing key");

        match err {
            ToolCallError::InvalidArgument { tool, param, .. } => {
                assert_eq!(tool, "sample");
                assert_eq!(param, "direction");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_required_ignores_non_object_schema() {
        let args = Map::new();
        assert!(validate_required("sample", &json!(true), &args).is_ok());
    }
}
