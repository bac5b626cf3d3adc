use std::fmt;

#[derive(Debug)]
pub enum ToolCallError {
    InvalidArgument {
        tool: String,
        param: String,
        reason: String,
    },
    ToolNotFound {
        name: String,
    },
    Transport(tonic::Status),
    Serialization(String),
}

impl ToolCallError {
    pub fn invalid_argument(
        tool: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            tool: tool.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ToolCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument {
                tool,
                param,
                reason,
            } => {
                write!(f, "Invalid argument '{param}' for tool '{tool}': {reason}")
            }
            Self::ToolNotFound { name } => write!(f, "Tool not found: {name}"),
            Self::Transport(status) => write!(
                f,
                "Transport error: {:?}: {}",
                status.code(),
                status.message()
            ),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ToolCallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(status) => Some(status),
            _ => None,
        }
    }
}

impl From<tonic::Status> for ToolCallError {
    fn from(status: tonic::Status) -> Self {
        Self::Transport(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_includes_code_and_message() {
        let err = ToolCallError::from(tonic::Status::unavailable("broker is down"));
        assert_eq!(err.to_string(), "Transport error: Unavailable: broker is down");
    }

    #[test]
    fn invalid_argument_display_names_tool_and_param() {
        let err = ToolCallError::invalid_argument("getCandles", "interval", "missing required parameter");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'interval' for tool 'getCandles': missing required parameter"
        );
    }
}
