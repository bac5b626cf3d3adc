use crate::grpc_proto::invest::{GetAccountsRequest, GetUserTariffRequest};
use crate::invest::RpcCall;
use crate::tool_api::{Output, Profile, ToolArgs, ToolCallError, ToolSpec};

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "getUserTariff",
            Profile::Read,
            "Retrieve the current user tariff and rate limits for methods/streams (UsersService.GetUserTariff). Useful to understand available quotas and features.",
            get_user_tariff,
        ),
        ToolSpec::new(
            "getAccounts",
            Profile::Read,
            "List all user accounts accessible by the current token (UsersService.GetAccounts). Use the result to obtain accountId values.",
            get_accounts,
        )
        .output(Output::RepeatedField("accounts")),
    ]
}

fn get_user_tariff(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetUserTariff(GetUserTariffRequest::default()))
}

fn get_accounts(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetAccounts(GetAccountsRequest::default()))
}
