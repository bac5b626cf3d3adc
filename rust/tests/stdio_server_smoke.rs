mod common;

use std::time::Duration;

use common::{initialize_request, invest_mcp_exe_path, spawn_invest_mcp, stop_child};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

const SERVE_ARGS: &[&str] = &["--token", "t.test", "--target", "127.0.0.1:1", "--logLevel", "none"];

async fn send(stdin: &mut tokio::process::ChildStdin, message: &Value) {
    let line = format!("{message}\n");
    stdin
        .write_all(line.as_bytes())
        .await
        .expect("write to stdin");
    stdin.flush().await.expect("flush stdin");
}

#[tokio::test]
async fn stdio_server_answers_initialize_and_lists_tools() {
    let mut child = spawn_invest_mcp(SERVE_ARGS, true, true).await;
    let mut stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    let mut lines = BufReader::new(stdout).lines();

    send(&mut stdin, &initialize_request(1)).await;
    send(
        &mut stdin,
        &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    send(
        &mut stdin,
        &json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
    )
    .await;

    let first = timeout(Duration::from_secs(10), lines.next_line())
        .await
        .expect("initialize timed out")
        .expect("read stdout")
        .expect("initialize response");
    let first: Value = serde_json::from_str(&first).expect("initialize json");
    assert_eq!(first["id"], 1);
    assert_eq!(first["result"]["serverInfo"]["name"], "invest-mcp");

    let second = timeout(Duration::from_secs(10), lines.next_line())
        .await
        .expect("tools/list timed out")
        .expect("read stdout")
        .expect("tools/list response");
    let second: Value = serde_json::from_str(&second).expect("tools/list json");
    assert_eq!(second["id"], 2);
    let names: Vec<&str> = second["result"]["tools"]
        .as_array()
        .expect("tool array")
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    assert!(names.contains(&"getCandles"));
    assert!(names.contains(&"postSandboxOrder"));
    assert!(!names.contains(&"postOrder"), "trade profile is off by default");

    drop(stdin);
    let status = timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not exit after stdin closed")
        .expect("wait for child");
    assert!(status.success());
    stop_child(&mut child).await;
}

#[tokio::test]
async fn invalid_utf8_line_gets_parse_error_and_server_keeps_going() {
    let mut child = spawn_invest_mcp(SERVE_ARGS, true, true).await;
    let mut stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    let mut lines = BufReader::new(stdout).lines();

    let mut garbled = br#"{"jsonrpc":"2.0","id":1,"method":"ping","params":{"x":""#.to_vec();
    garbled.push(0xff);
    garbled.extend_from_slice(b"\"}}\n");
    stdin.write_all(&garbled).await.expect("write garbled line");
    send(
        &mut stdin,
        &json!({ "jsonrpc": "2.0", "id": 2, "method": "ping" }),
    )
    .await;

    let first = timeout(Duration::from_secs(10), lines.next_line())
        .await
        .expect("parse error timed out")
        .expect("read stdout")
        .expect("parse error response");
    let first: Value = serde_json::from_str(&first).expect("parse error json");
    assert_eq!(first["id"], Value::Null);
    assert_eq!(first["error"]["code"], -32700);

    let second = timeout(Duration::from_secs(10), lines.next_line())
        .await
        .expect("ping timed out")
        .expect("read stdout")
        .expect("ping response");
    let second: Value = serde_json::from_str(&second).expect("ping json");
    assert_eq!(second["id"], 2);
    assert_eq!(second["result"], json!({}));

    drop(stdin);
    let status = timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not exit after stdin closed")
        .expect("wait for child");
    assert!(status.success());
    stop_child(&mut child).await;
}

#[tokio::test]
async fn serve_without_token_exits_with_error() {
    let output = Command::new(invest_mcp_exe_path())
        .env_remove("INVEST_TOKEN")
        .output()
        .await
        .expect("run invest-mcp");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[invest-mcp] Error:"), "{stderr}");
}

#[tokio::test]
async fn tools_subcommand_lists_selected_profiles() {
    let output = Command::new(invest_mcp_exe_path())
        .args(["tools", "--profile", "trade", "--target", "127.0.0.1:1"])
        .env_remove("INVEST_TOKEN")
        .env_remove("INVEST_PROFILES")
        .output()
        .await
        .expect("run invest-mcp tools");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("postStopOrder"), "{stdout}");
    assert!(!stdout.contains("getCandles"), "{stdout}");
}
