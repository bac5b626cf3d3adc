mod args;
mod catalog;
mod dispatch;
mod error;
mod render;
mod schema;

pub use args::{enum_values, ToolArgs};
pub use catalog::{Output, ParamKind, ParamSpec, Presence, Profile, RequestBuilder, ToolSpec};
pub use dispatch::ToolRegistry;
pub use error::ToolCallError;
pub use render::{project_repeated, render, ToolValue};
pub use schema::{input_schema, validate_required};
