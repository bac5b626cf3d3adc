mod common;

use common::{registry, RecordingFacade, ALL_PROFILES};
use invest_mcp::grpc_proto::invest::{
    Account, CancelOrderResponse, GetAccountsResponse, PositionsSecurities, PostOrderResponse,
};
use invest_mcp::grpc_proto::StructuredMessage;
use invest_mcp::tool_api::{project_repeated, render, ToolCallError, ToolValue};
use prost_types::Timestamp;
use serde_json::{json, Value};

fn rendered(message: impl StructuredMessage + 'static) -> String {
    render(Some(&ToolValue::Message(Box::new(message)))).expect("render")
}

#[test]
fn default_valued_fields_are_printed() {
    let text = rendered(PositionsSecurities {
        figi: "BBG004730N88".to_string(),
        blocked: 0,
        ..Default::default()
    });

    assert!(text.contains("\"figi\": \"BBG004730N88\""), "{text}");
    assert!(text.contains("\"blocked\": 0"), "{text}");
    assert!(text.contains("\"balance\": 0"), "{text}");
    assert!(text.contains("\"position_uid\": \"\""), "{text}");
    assert!(text.contains("\"exchange_blocked\": false"), "{text}");
}

#[test]
fn wide_integers_render_as_numbers() {
    let text = rendered(PositionsSecurities {
        balance: 9_007_199_254,
        ..Default::default()
    });
    let value: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["balance"], json!(9_007_199_254_i64));
}

#[test]
fn enums_render_by_name_and_timestamps_as_rfc3339() {
    let text = rendered(PostOrderResponse {
        order_id: "ord-1".to_string(),
        direction: 1,
        ..Default::default()
    });
    let value: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["order_id"], json!("ord-1"));
    assert_eq!(value["direction"], json!("ORDER_DIRECTION_BUY"));

    let text = rendered(CancelOrderResponse {
        time: Some(Timestamp {
            seconds: 1_700_000_000,
            nanos: 0,
        }),
    });
    let value: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["time"], json!("2023-11-14T22:13:20Z"));
}

#[test]
fn plain_id_list_renders_every_entry() {
    let value = ToolValue::Plain(json!(["acc-1", "acc-2"]));
    let text = render(Some(&value)).expect("render");
    let parsed: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(parsed, json!(["acc-1", "acc-2"]));
}

#[derive(Debug)]
struct CorruptPosition;

impl StructuredMessage for CorruptPosition {
    fn message_name(&self) -> &'static str {
        "tinkoff.public.invest.api.contract.v1.PositionsSecurities"
    }

    fn encode_message(&self) -> Vec<u8> {
        // Field 1 claims five bytes but only one follows.
        vec![0x0a, 0x05, b'a']
    }
}

#[derive(Debug)]
struct UnknownMessage;

impl StructuredMessage for UnknownMessage {
    fn message_name(&self) -> &'static str {
        "tinkoff.public.invest.api.contract.v1.NoSuchMessage"
    }

    fn encode_message(&self) -> Vec<u8> {
        Vec::new()
    }
}

#[test]
fn undecodable_message_is_a_serialization_error() {
    let err = render(Some(&ToolValue::Message(Box::new(CorruptPosition))))
        .expect_err("corrupt bytes must fail");
    assert!(matches!(err, ToolCallError::Serialization(_)), "{err:?}");
    assert!(err.to_string().starts_with("Serialization error:"), "{err}");
}

#[test]
fn unknown_message_is_a_serialization_error() {
    let err = render(Some(&ToolValue::Message(Box::new(UnknownMessage))))
        .expect_err("unknown message must fail");
    assert!(err.to_string().contains("NoSuchMessage"), "{err}");
}

fn two_accounts() -> GetAccountsResponse {
    GetAccountsResponse {
        accounts: vec![
            Account {
                id: "2000000001".to_string(),
                name: "Broker".to_string(),
                r#type: 1,
                ..Default::default()
            },
            Account {
                id: "2000000002".to_string(),
                name: "IIS".to_string(),
                r#type: 2,
                ..Default::default()
            },
        ],
    }
}

#[test]
fn repeated_projection_yields_an_array() {
    let projected = project_repeated(&two_accounts(), "accounts").expect("projection");
    let items = projected.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], json!("2000000001"));
    assert_eq!(items[1]["type"], json!("ACCOUNT_TYPE_TINKOFF_IIS"));
}

#[test]
fn projection_of_missing_field_fails() {
    let err = project_repeated(&two_accounts(), "positions").expect_err("no such field");
    assert!(matches!(err, ToolCallError::Serialization(_)), "{err:?}");
}

#[tokio::test]
async fn get_accounts_tool_returns_the_account_list() {
    let facade = RecordingFacade::new(|_| Ok(Box::new(two_accounts())));
    let registry = registry(&facade, ALL_PROFILES);

    let text = registry.call("getAccounts", None).await.expect("getAccounts");
    let parsed: Value = serde_json::from_str(&text).expect("json");
    let items = parsed.as_array().expect("top-level array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["name"], json!("IIS"));
}
