use clap::ValueEnum;

use crate::invest::RpcCall;
use crate::tool_api::args::ToolArgs;
use crate::tool_api::error::ToolCallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Profile {
    Read,
    Sandbox,
    Trade,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Sandbox => "sandbox",
            Self::Trade => "trade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int64,
    Int32,
    /// UTC seconds since the epoch, sent as `google.protobuf.Timestamp`.
    EpochSeconds,
    /// Enum name within the contract package, e.g. `OrderDirection`.
    Enum(&'static str),
    StringList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Member of an all-or-nothing group mapped to one composite field.
    Grouped(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub presence: Presence,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
            description,
        }
    }

    pub const fn grouped(
        name: &'static str,
        kind: ParamKind,
        group: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Grouped(group),
            description,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Message,
    RepeatedField(&'static str),
}

pub type RequestBuilder = fn(&ToolArgs<'_>) -> Result<RpcCall, ToolCallError>;

#[derive(Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub profile: Profile,
    pub params: Vec<ParamSpec>,
    pub build: RequestBuilder,
    pub output: Output,
}

impl ToolSpec {
    pub fn new(
        name: &'static str,
        profile: Profile,
        description: &'static str,
        build: RequestBuilder,
    ) -> Self {
        Self {
            name,
            description,
            profile,
            params: Vec::new(),
            build,
            output: Output::Message,
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn params(mut self, specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(specs);
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .field("params", &self.params)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
