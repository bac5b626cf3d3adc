#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use invest_mcp::grpc_proto::invest::GetAccountsResponse;
use invest_mcp::grpc_proto::StructuredMessage;
use invest_mcp::invest::{InvestFacade, RpcCall};
use invest_mcp::tool_api::{Profile, ToolRegistry};
use invest_mcp::tools::catalog;
use serde_json::{json, Value};
use tokio::process::{Child, Command};
use tonic::Status;

type Responder = dyn Fn(&RpcCall) -> Result<Box<dyn StructuredMessage>, Status> + Send + Sync;

/// Facade double that records every request and answers from a closure.
#[derive(Clone)]
pub struct RecordingFacade {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<RpcCall>>>,
    respond: Arc<Responder>,
}

impl RecordingFacade {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&RpcCall) -> Result<Box<dyn StructuredMessage>, Status> + Send + Sync + 'static,
    {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            respond: Arc::new(respond),
        }
    }

    /// Answers every call with an empty account list.
    pub fn empty() -> Self {
        Self::new(|_| Ok(Box::new(GetAccountsResponse::default())))
    }

    pub fn failing(status: Status) -> Self {
        Self::new(move |_| Err(status.clone()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RpcCall> {
        self.seen.lock().expect("seen lock").last().cloned()
    }
}

#[tonic::async_trait]
impl InvestFacade for RecordingFacade {
    async fn call(&self, call: RpcCall) -> Result<Box<dyn StructuredMessage>, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = (self.respond)(&call);
        self.seen.lock().expect("seen lock").push(call);
        result
    }
}

pub const ALL_PROFILES: &[Profile] = &[Profile::Read, Profile::Sandbox, Profile::Trade];

pub fn registry(facade: &RecordingFacade, profiles: &[Profile]) -> ToolRegistry {
    ToolRegistry::new(catalog(), profiles, Arc::new(facade.clone())).expect("registry")
}

/// Builds the request a tool would send, without caring about the response.
pub async fn built_call(tool: &str, arguments: Value) -> RpcCall {
    let facade = RecordingFacade::empty();
    let registry = registry(&facade, ALL_PROFILES);
    registry
        .call(tool, Some(&arguments))
        .await
        .unwrap_or_else(|err| panic!("{tool} failed: {err}"));
    assert_eq!(facade.call_count(), 1);
    facade.last_call().expect("recorded call")
}

pub async fn spawn_invest_mcp(args: &[&str], pipe_stdin: bool, pipe_stdout: bool) -> Child {
    let exe = invest_mcp_exe_path();

    let mut cmd = Command::new(exe);
    cmd.args(args)
        .env_remove("INVEST_TOKEN")
        .env_remove("INVEST_TARGET")
        .env_remove("INVEST_PROFILES")
        .stdin(if pipe_stdin {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(if pipe_stdout {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stderr(Stdio::null())
        .kill_on_drop(true);

    cmd.spawn().expect("failed to spawn invest-mcp")
}

pub fn invest_mcp_exe_path() -> PathBuf {
    if let Some(exe) = option_env!("CARGO_BIN_EXE_invest-mcp") {
        return PathBuf::from(exe);
    }

    let current = std::env::current_exe().expect("failed to read current test binary path");
    let target_dir = current
        .parent()
        .and_then(|path| path.parent())
        .expect("failed to derive target/debug directory from test binary path");
    let fallback = target_dir.join(format!("invest-mcp{}", std::env::consts::EXE_SUFFIX));
    assert!(
        fallback.exists(),
        "invest-mcp binary not found at {}",
        fallback.display()
    );
    fallback
}

pub async fn stop_child(child: &mut Child) {
    match child.try_wait() {
        Ok(Some(_)) => {}
        Ok(None) | Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
        }
    }
}

pub fn initialize_request(id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "invest-mcp-test",
                "version": "1.0.0"
            }
        }
    })
}
