use crate::grpc_proto::invest::{
    CancelOrderRequest, GetOrderStateRequest, GetOrdersRequest, PostOrderAsyncRequest,
    PostOrderRequest,
};
use crate::invest::RpcCall;
use crate::tool_api::{ParamKind, ParamSpec, Profile, ToolArgs, ToolCallError, ToolSpec};

use super::{account_id, instrument_id, order_id, price_group};

const ORDER_DIRECTION: &str = "OrderDirection";
const ORDER_TYPE: &str = "OrderType";

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "postOrder",
            Profile::Trade,
            "Create a trading order with parameters (OrdersService.PostOrder). Supports BUY/SELL and various order types. For LIMIT orders, provide price (units,nano). Returns orderId and status.",
            post_order,
        )
        .params(order_params())
        .param(idempotency_key()),
        ToolSpec::new(
            "postOrderAsync",
            Profile::Trade,
            "Create a trading order asynchronously (OrdersService.PostOrderAsync). Returns immediate acceptance status; check order state later for execution details.",
            post_order_async,
        )
        .params(order_params())
        .param(idempotency_key()),
        ToolSpec::new(
            "cancelOrder",
            Profile::Trade,
            "Cancel an active order by accountId and orderId (OrdersService.CancelOrder).",
            cancel_order,
        )
        .params([account_id(), order_id()]),
        ToolSpec::new(
            "getOrders",
            Profile::Trade,
            "List active orders for an account (OrdersService.GetOrders).",
            get_orders,
        )
        .param(account_id()),
        ToolSpec::new(
            "getOrderState",
            Profile::Trade,
            "Get the state of an order by accountId and orderId (OrdersService.GetOrderState).",
            get_order_state,
        )
        .params([account_id(), order_id()]),
    ]
}

/// Parameters shared by live and sandbox order placement.
pub(super) fn order_params() -> Vec<ParamSpec> {
    let mut params = vec![
        account_id(),
        instrument_id(),
        ParamSpec::required("quantity", ParamKind::Int64, "Number of lots (quantity)."),
        ParamSpec::required(
            "direction",
            ParamKind::Enum(ORDER_DIRECTION),
            "Operation direction (direction).",
        ),
        ParamSpec::required(
            "orderType",
            ParamKind::Enum(ORDER_TYPE),
            "Order type (order_type).",
        ),
    ];
    params.extend(price_group("limitPriceUnits", "limitPriceNano", "limitPrice"));
    params
}

fn idempotency_key() -> ParamSpec {
    ParamSpec::optional(
        "orderId",
        ParamKind::String,
        "Client idempotency key for the order (order_id). Optional.",
    )
}

pub(super) fn post_order_request(args: &ToolArgs<'_>) -> Result<PostOrderRequest, ToolCallError> {
    Ok(PostOrderRequest {
        quantity: args.int64("quantity")?,
        price: args.quotation("limitPriceUnits", "limitPriceNano")?,
        direction: args.enumeration("direction", ORDER_DIRECTION)?,
        account_id: args.string("accountId")?,
        order_type: args.enumeration("orderType", ORDER_TYPE)?,
        instrument_id: args.string("instrumentId")?,
        ..Default::default()
    })
}

pub(super) fn cancel_order_request(
    args: &ToolArgs<'_>,
) -> Result<CancelOrderRequest, ToolCallError> {
    Ok(CancelOrderRequest {
        account_id: args.string("accountId")?,
        order_id: args.string("orderId")?,
        order_id_type: None,
    })
}

pub(super) fn orders_request(args: &ToolArgs<'_>) -> Result<GetOrdersRequest, ToolCallError> {
    Ok(GetOrdersRequest {
        account_id: args.string("accountId")?,
    })
}

pub(super) fn order_state_request(
    args: &ToolArgs<'_>,
) -> Result<GetOrderStateRequest, ToolCallError> {
    Ok(GetOrderStateRequest {
        account_id: args.string("accountId")?,
        order_id: args.string("orderId")?,
        ..Default::default()
    })
}

fn post_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    let mut request = post_order_request(args)?;
    request.order_id = args.opt_string("orderId")?.unwrap_or_default();
    Ok(RpcCall::PostOrder(request))
}

fn post_order_async(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::PostOrderAsync(PostOrderAsyncRequest {
        instrument_id: args.string("instrumentId")?,
        quantity: args.int64("quantity")?,
        price: args.quotation("limitPriceUnits", "limitPriceNano")?,
        direction: args.enumeration("direction", ORDER_DIRECTION)?,
        account_id: args.string("accountId")?,
        order_type: args.enumeration("orderType", ORDER_TYPE)?,
        order_id: args.opt_string("orderId")?.unwrap_or_default(),
        ..Default::default()
    }))
}

fn cancel_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    cancel_order_request(args).map(RpcCall::CancelOrder)
}

fn get_orders(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    orders_request(args).map(RpcCall::GetOrders)
}

fn get_order_state(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    order_state_request(args).map(RpcCall::GetOrderState)
}
