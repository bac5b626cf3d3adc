use crate::grpc_proto::invest::{
    CancelStopOrderRequest, GetStopOrdersRequest, PostStopOrderRequest, Quotation,
};
use crate::invest::RpcCall;
use crate::tool_api::{ParamKind, ParamSpec, Profile, ToolArgs, ToolCallError, ToolSpec};

use super::{account_id, instrument_id};

const STOP_ORDER_DIRECTION: &str = "StopOrderDirection";
const STOP_ORDER_TYPE: &str = "StopOrderType";
const STOP_ORDER_EXPIRATION_TYPE: &str = "StopOrderExpirationType";

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "postStopOrder",
            Profile::Trade,
            "Place a stop order (StopOrdersService.PostStopOrder) with direction, type and expiration. Provide both trigger stopPrice and execution price as Quotation (units,nano). Returns stopOrderId.",
            post_stop_order,
        )
        .params([
            account_id(),
            instrument_id(),
            ParamSpec::required(
                "direction",
                ParamKind::Enum(STOP_ORDER_DIRECTION),
                "Stop order direction (direction).",
            ),
            ParamSpec::required(
                "stopOrderType",
                ParamKind::Enum(STOP_ORDER_TYPE),
                "Stop order type (stop_order_type).",
            ),
            ParamSpec::required(
                "expirationType",
                ParamKind::Enum(STOP_ORDER_EXPIRATION_TYPE),
                "Expiration policy (expiration_type).",
            ),
            ParamSpec::required(
                "priceUnits",
                ParamKind::Int64,
                "Execution price, integer part (price.units).",
            ),
            ParamSpec::required(
                "priceNano",
                ParamKind::Int32,
                "Execution price, fractional part (price.nano).",
            ),
            ParamSpec::required(
                "stopPriceUnits",
                ParamKind::Int64,
                "Trigger price, integer part (stop_price.units).",
            ),
            ParamSpec::required(
                "stopPriceNano",
                ParamKind::Int32,
                "Trigger price, fractional part (stop_price.nano).",
            ),
            ParamSpec::required("quantity", ParamKind::Int64, "Number of lots (quantity)."),
            ParamSpec::optional(
                "expireDateEpochSeconds",
                ParamKind::EpochSeconds,
                "Expiration time in UTC as UNIX seconds (expire_date); used with GOOD_TILL_DATE. Optional.",
            ),
        ]),
        ToolSpec::new(
            "getStopOrders",
            Profile::Trade,
            "List all active stop orders for the account (StopOrdersService.GetStopOrders).",
            get_stop_orders,
        )
        .param(account_id()),
        ToolSpec::new(
            "cancelStopOrder",
            Profile::Trade,
            "Cancel a stop order by accountId and stopOrderId (StopOrdersService.CancelStopOrder).",
            cancel_stop_order,
        )
        .params([
            account_id(),
            ParamSpec::required(
                "stopOrderId",
                ParamKind::String,
                "Stop order ID (stop_order_id).",
            ),
        ]),
    ]
}

fn post_stop_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::PostStopOrder(PostStopOrderRequest {
        quantity: args.int64("quantity")?,
        price: Some(Quotation {
            units: args.int64("priceUnits")?,
            nano: args.int32("priceNano")?,
        }),
        stop_price: Some(Quotation {
            units: args.int64("stopPriceUnits")?,
            nano: args.int32("stopPriceNano")?,
        }),
        direction: args.enumeration("direction", STOP_ORDER_DIRECTION)?,
        account_id: args.string("accountId")?,
        expiration_type: args.enumeration("expirationType", STOP_ORDER_EXPIRATION_TYPE)?,
        stop_order_type: args.enumeration("stopOrderType", STOP_ORDER_TYPE)?,
        expire_date: args.opt_timestamp("expireDateEpochSeconds")?,
        instrument_id: args.string("instrumentId")?,
        ..Default::default()
    }))
}

fn get_stop_orders(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetStopOrders(GetStopOrdersRequest {
        account_id: args.string("accountId")?,
        ..Default::default()
    }))
}

fn cancel_stop_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::CancelStopOrder(CancelStopOrderRequest {
        account_id: args.string("accountId")?,
        stop_order_id: args.string("stopOrderId")?,
    }))
}
