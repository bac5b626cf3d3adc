use futures::StreamExt;
use serde_json::{json, Value};
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};

use crate::support::signals::install_signal_handlers;
use crate::tool_api::{ToolCallError, ToolRegistry};

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

pub const SERVER_NAME: &str = "invest-mcp";

pub struct McpServer {
    registry: ToolRegistry,
    protocol_version: String,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, protocol_version: impl Into<String>) -> Self {
        Self {
            registry,
            protocol_version: protocol_version.into(),
        }
    }

    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        self.handle_frame(line.as_bytes()).await
    }

    // Frames need not be valid UTF-8. Notifications yield `None`.
    pub async fn handle_frame(&self, frame: &[u8]) -> Option<Value> {
        match serde_json::from_slice::<Value>(frame) {
            Ok(message) => self.handle_message(message).await,
            Err(err) => {
                tracing::error!("Invalid JSON from stdin: {err}");
                Some(error_response(Value::Null, PARSE_ERROR, "Parse error"))
            }
        }
    }

    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let Some(obj) = message.as_object() else {
            return Some(error_response(Value::Null, INVALID_REQUEST, "Invalid Request"));
        };

        let id = obj.get("id").cloned();
        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // Stray responses carry no method and need no reply.
            return id.map(|id| error_response(id, INVALID_REQUEST, "Invalid Request"));
        };

        let Some(id) = id else {
            tracing::debug!("Notification: {method}");
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        let outcome = match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.list() })),
            "tools/call" => self.call_tool(&params).await,
            other => Err((METHOD_NOT_FOUND, format!("Method not found: {other}"))),
        };

        Some(match outcome {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err((code, message)) => error_response(id, code, &message),
        })
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(&self.protocol_version);
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, (i64, String)> {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return Err((INVALID_PARAMS, "tools/call requires a tool name".to_string()));
        };

        match self.registry.call(name, params.get("arguments")).await {
            Ok(text) => Ok(tool_result(text, false)),
            Err(err @ ToolCallError::ToolNotFound { .. }) => Err((INVALID_PARAMS, err.to_string())),
            Err(err) => {
                tracing::error!("Tool {name} failed: {err}");
                Ok(tool_result(err.to_string(), true))
            }
        }
    }
}

pub async fn run(server: McpServer) -> Result<(), String> {
    tracing::info!("  - tools: {}", server.registry.len());
    tracing::info!("  - protocolVersion: {}", server.protocol_version);

    install_signal_handlers();

    let codec = AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec());
    let mut frames = FramedRead::new(tokio::io::stdin(), codec);
    while let Some(frame) = frames.next().await {
        let frame = frame.map_err(|err| err.to_string())?;
        if frame.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        if let Some(response) = server.handle_frame(&frame).await {
            println!("{response}");
        }
    }

    tracing::info!("stdin closed. Exiting...");
    Ok(())
}

fn tool_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}
