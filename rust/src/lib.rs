pub mod config;
pub mod gateways;
pub mod grpc_proto;
pub mod invest;
pub mod support;
pub mod tool_api;
pub mod tools;
