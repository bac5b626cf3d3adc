use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::invest::InvestFacade;
use crate::tool_api::args::ToolArgs;
use crate::tool_api::catalog::{Output, Profile, ToolSpec};
use crate::tool_api::error::ToolCallError;
use crate::tool_api::render::{project_repeated, render, ToolValue};
use crate::tool_api::schema::{input_schema, validate_required};

struct RegisteredTool {
    spec: ToolSpec,
    schema: Value,
}

pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    facade: Arc<dyn InvestFacade>,
}

impl ToolRegistry {
    pub fn new(
        catalog: Vec<ToolSpec>,
        profiles: &[Profile],
        facade: Arc<dyn InvestFacade>,
    ) -> Result<Self, String> {
        let mut tools = Vec::new();
        for spec in catalog {
            if !profiles.contains(&spec.profile) {
                continue;
            }
            if tools
                .iter()
                .any(|tool: &RegisteredTool| tool.spec.name == spec.name)
            {
                return Err(format!("Duplicate tool name in catalog: {}", spec.name));
            }
            let schema = input_schema(&spec)
                .map_err(|err| format!("Failed to build schema for {}: {err}", spec.name))?;
            tools.push(RegisteredTool { spec, schema });
        }

        Ok(Self { tools, facade })
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(|tool| tool.spec.name)
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.find(name).map(|tool| &tool.spec)
    }

    pub fn list(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.spec.name,
                    "description": tool.spec.description,
                    "inputSchema": tool.schema,
                })
            })
            .collect()
    }

    /// Builds the request, makes one facade call and renders the response.
    pub async fn call(&self, name: &str, arguments: Option<&Value>) -> Result<String, ToolCallError> {
        let tool = self.find(name).ok_or_else(|| ToolCallError::ToolNotFound {
            name: name.to_string(),
        })?;

        let empty = Map::new();
        let args = match arguments {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ToolCallError::invalid_argument(
                    name,
                    "$",
                    "expected JSON object arguments",
                ))
            }
        };

        validate_required(tool.spec.name, &tool.schema, args)?;
        let call = (tool.spec.build)(&ToolArgs::new(tool.spec.name, args))?;
        tracing::debug!("Tool {name} -> {}", call.method());

        let response = self.facade.call(call).await?;
        let value = match tool.spec.output {
            Output::Message => ToolValue::Message(response),
            Output::RepeatedField(field) => {
                ToolValue::Plain(project_repeated(response.as_ref(), field)?)
            }
        };
        render(Some(&value))
    }

    fn find(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.spec.name == name)
    }
}
