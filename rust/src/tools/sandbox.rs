use crate::grpc_proto::invest::{
    CloseSandboxAccountRequest, GetAccountsRequest, GetMaxLotsRequest,
    GetOperationsByCursorRequest, MoneyValue, OpenSandboxAccountRequest, OperationsRequest,
    ReplaceOrderRequest, SandboxPayInRequest, WithdrawLimitsRequest,
};
use crate::invest::RpcCall;
use crate::tool_api::{ParamKind, ParamSpec, Profile, ToolArgs, ToolCallError, ToolSpec};

use super::operations::{portfolio_request, positions_request};
use super::orders::{
    cancel_order_request, order_params, order_state_request, orders_request, post_order_request,
};
use super::{account_id, from_epoch, instrument_id, order_id, price_group, to_epoch};

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "openSandboxAccount",
            Profile::Sandbox,
            "Open a new sandbox account (SandboxService.OpenSandboxAccount). Returns the created account identifier for simulated trading and testing.",
            open_sandbox_account,
        )
        .param(ParamSpec::optional(
            "name",
            ParamKind::String,
            "Display name of the new account (name). Optional.",
        )),
        ToolSpec::new(
            "closeSandboxAccount",
            Profile::Sandbox,
            "Close an existing sandbox account by accountId (SandboxService.CloseSandboxAccount). All active orders will be canceled.",
            close_sandbox_account,
        )
        .param(account_id()),
        ToolSpec::new(
            "getSandboxAccounts",
            Profile::Sandbox,
            "List all sandbox accounts for the current token (SandboxService.GetSandboxAccounts).",
            get_sandbox_accounts,
        ),
        ToolSpec::new(
            "sandboxPayIn",
            Profile::Sandbox,
            "Deposit virtual funds to a sandbox account (SandboxService.SandboxPayIn). Specify amount as MoneyValue (currency, units, nano).",
            sandbox_pay_in,
        )
        .params([
            account_id(),
            ParamSpec::required(
                "amountUnits",
                ParamKind::Int64,
                "Integer part of the amount (MoneyValue.units).",
            ),
            ParamSpec::required(
                "amountNano",
                ParamKind::Int32,
                "Fractional part of the amount (MoneyValue.nano).",
            ),
            ParamSpec::required(
                "currency",
                ParamKind::String,
                "ISO currency code (MoneyValue.currency).",
            ),
        ]),
        ToolSpec::new(
            "postSandboxOrder",
            Profile::Sandbox,
            "Place a sandbox order (SandboxService.PostSandboxOrder). Supports MARKET/BESTPRICE/LIMIT types; for LIMIT provide price units/nano. Returns PostOrderResponse with order id.",
            post_sandbox_order,
        )
        .params(order_params()),
        ToolSpec::new(
            "replaceSandboxOrder",
            Profile::Sandbox,
            "Replace an existing sandbox order (SandboxService.ReplaceSandboxOrder). Update quantity and optionally price for LIMIT orders.",
            replace_sandbox_order,
        )
        .params([
            account_id(),
            ParamSpec::required("orderId", ParamKind::String, "Exchange order ID (order_id)."),
            ParamSpec::required("newQuantity", ParamKind::Int64, "Number of lots (quantity)."),
        ])
        .params(price_group("priceUnits", "priceNano", "price")),
        ToolSpec::new(
            "cancelSandboxOrder",
            Profile::Sandbox,
            "Cancel a sandbox order by accountId and orderId (SandboxService.CancelSandboxOrder).",
            cancel_sandbox_order,
        )
        .params([account_id(), order_id()]),
        ToolSpec::new(
            "getSandboxOrders",
            Profile::Sandbox,
            "Get all active sandbox orders for an account (SandboxService.GetSandboxOrders).",
            get_sandbox_orders,
        )
        .param(account_id()),
        ToolSpec::new(
            "getSandboxOrderState",
            Profile::Sandbox,
            "Get the state of a sandbox order by accountId and orderId (SandboxService.GetSandboxOrderState).",
            get_sandbox_order_state,
        )
        .params([account_id(), order_id()]),
        ToolSpec::new(
            "getSandboxPortfolio",
            Profile::Sandbox,
            "Get sandbox portfolio snapshot for the account (SandboxService.GetSandboxPortfolio).",
            get_sandbox_portfolio,
        )
        .param(account_id()),
        ToolSpec::new(
            "getSandboxPositions",
            Profile::Sandbox,
            "Get sandbox positions for the account (SandboxService.GetSandboxPositions).",
            get_sandbox_positions,
        )
        .param(account_id()),
        ToolSpec::new(
            "getSandboxOperations",
            Profile::Sandbox,
            "Get sandbox operations for a time range [from,to] in epoch seconds (SandboxService.GetSandboxOperations).",
            get_sandbox_operations,
        )
        .params([account_id(), from_epoch(true), to_epoch(true)]),
        ToolSpec::new(
            "getSandboxOperationsByCursor",
            Profile::Sandbox,
            "Get sandbox operations using cursor pagination, optionally providing cursor and time range (SandboxService.GetSandboxOperationsByCursor).",
            get_sandbox_operations_by_cursor,
        )
        .params([
            account_id(),
            ParamSpec::optional(
                "cursor",
                ParamKind::String,
                "Cursor to start the response from (cursor). Optional.",
            ),
            from_epoch(false),
            to_epoch(false),
        ]),
        ToolSpec::new(
            "getSandboxWithdrawLimits",
            Profile::Sandbox,
            "Get sandbox withdraw limits for the account (SandboxService.GetSandboxWithdrawLimits).",
            get_sandbox_withdraw_limits,
        )
        .param(account_id()),
        ToolSpec::new(
            "getSandboxMaxLots",
            Profile::Sandbox,
            "Calculate the maximum number of lots available in sandbox for a potential order at optional price (SandboxService.GetSandboxMaxLots).",
            get_sandbox_max_lots,
        )
        .params([account_id(), instrument_id()])
        .params(price_group("priceUnits", "priceNano", "price")),
    ]
}

fn open_sandbox_account(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::OpenSandboxAccount(OpenSandboxAccountRequest {
        name: args.opt_string("name")?,
    }))
}

fn close_sandbox_account(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::CloseSandboxAccount(CloseSandboxAccountRequest {
        account_id: args.string("accountId")?,
    }))
}

fn get_sandbox_accounts(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetSandboxAccounts(GetAccountsRequest::default()))
}

fn sandbox_pay_in(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::SandboxPayIn(SandboxPayInRequest {
        account_id: args.string("accountId")?,
        amount: Some(MoneyValue {
            currency: args.string("currency")?,
            units: args.int64("amountUnits")?,
            nano: args.int32("amountNano")?,
        }),
    }))
}

fn post_sandbox_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    post_order_request(args).map(RpcCall::PostSandboxOrder)
}

fn replace_sandbox_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::ReplaceSandboxOrder(ReplaceOrderRequest {
        account_id: args.string("accountId")?,
        order_id: args.string("orderId")?,
        quantity: args.int64("newQuantity")?,
        price: args.quotation("priceUnits", "priceNano")?,
        ..Default::default()
    }))
}

fn cancel_sandbox_order(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    cancel_order_request(args).map(RpcCall::CancelSandboxOrder)
}

fn get_sandbox_orders(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    orders_request(args).map(RpcCall::GetSandboxOrders)
}

fn get_sandbox_order_state(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    order_state_request(args).map(RpcCall::GetSandboxOrderState)
}

fn get_sandbox_portfolio(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    portfolio_request(args).map(RpcCall::GetSandboxPortfolio)
}

fn get_sandbox_positions(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    positions_request(args).map(RpcCall::GetSandboxPositions)
}

fn get_sandbox_operations(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetSandboxOperations(OperationsRequest {
        account_id: args.string("accountId")?,
        from: Some(args.timestamp("fromEpochSeconds")?),
        to: Some(args.timestamp("toEpochSeconds")?),
        ..Default::default()
    }))
}

fn get_sandbox_operations_by_cursor(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetSandboxOperationsByCursor(
        GetOperationsByCursorRequest {
            account_id: args.string("accountId")?,
            cursor: args.opt_string("cursor")?,
            from: args.opt_timestamp("fromEpochSeconds")?,
            to: args.opt_timestamp("toEpochSeconds")?,
            ..Default::default()
        },
    ))
}

fn get_sandbox_withdraw_limits(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetSandboxWithdrawLimits(WithdrawLimitsRequest {
        account_id: args.string("accountId")?,
    }))
}

fn get_sandbox_max_lots(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetSandboxMaxLots(GetMaxLotsRequest {
        account_id: args.string("accountId")?,
        instrument_id: args.string("instrumentId")?,
        price: args.quotation("priceUnits", "priceNano")?,
    }))
}
