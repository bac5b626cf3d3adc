use crate::grpc_proto::invest::{PortfolioRequest, PositionsRequest};
use crate::invest::RpcCall;
use crate::tool_api::{Profile, ToolArgs, ToolCallError, ToolSpec};

use super::account_id;

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "getPortfolio",
            Profile::Read,
            "Get the portfolio snapshot for a live account (OperationsService.GetPortfolio). Returns totals, expected yield and positions.",
            get_portfolio,
        )
        .param(account_id()),
        ToolSpec::new(
            "getPositions",
            Profile::Read,
            "Get money, securities and futures positions for a live account (OperationsService.GetPositions).",
            get_positions,
        )
        .param(account_id()),
    ]
}

pub(super) fn portfolio_request(args: &ToolArgs<'_>) -> Result<PortfolioRequest, ToolCallError> {
    Ok(PortfolioRequest {
        account_id: args.string("accountId")?,
        currency: None,
    })
}

pub(super) fn positions_request(args: &ToolArgs<'_>) -> Result<PositionsRequest, ToolCallError> {
    Ok(PositionsRequest {
        account_id: args.string("accountId")?,
    })
}

fn get_portfolio(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    portfolio_request(args).map(RpcCall::GetPortfolio)
}

fn get_positions(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    positions_request(args).map(RpcCall::GetPositions)
}
