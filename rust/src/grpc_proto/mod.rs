use std::fmt;
use std::sync::OnceLock;

use prost_reflect::DescriptorPool;

#[allow(clippy::all, clippy::pedantic)]
pub mod invest {
    tonic::include_proto!("tinkoff.public.invest.api.contract.v1");
}

pub const PACKAGE: &str = "tinkoff.public.invest.api.contract.v1";

static DESCRIPTOR_SET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/invest_descriptor.bin"));

/// Descriptors for every compiled contract, including the well-known imports.
pub fn descriptor_pool() -> Result<&'static DescriptorPool, String> {
    static POOL: OnceLock<Result<DescriptorPool, String>> = OnceLock::new();
    POOL.get_or_init(|| {
        DescriptorPool::decode(DESCRIPTOR_SET)
            .map_err(|err| format!("Embedded descriptor set is invalid: {err}"))
    })
    .as_ref()
    .map_err(Clone::clone)
}

/// A generated message that can be resolved against the descriptor pool.
pub trait StructuredMessage: fmt::Debug + Send + Sync {
    /// Fully qualified protobuf name, e.g. `tinkoff.public.invest.api.contract.v1.Brand`.
    fn message_name(&self) -> &'static str;

    fn encode_message(&self) -> Vec<u8>;
}

macro_rules! structured_messages {
    ($($ty:ident),* $(,)?) => {
        $(
            impl StructuredMessage for invest::$ty {
                fn message_name(&self) -> &'static str {
                    concat!("tinkoff.public.invest.api.contract.v1.", stringify!($ty))
                }

                fn encode_message(&self) -> Vec<u8> {
                    prost::Message::encode_to_vec(self)
                }
            }
        )*
    };
}

structured_messages!(
    // instruments
    Brand,
    GetBrandsResponse,
    GetAssetFundamentalsResponse,
    GetAssetReportsResponse,
    GetConsensusForecastsResponse,
    GetForecastResponse,
    RiskRatesResponse,
    // market data
    GetCandlesResponse,
    GetOrderBookResponse,
    GetTradingStatusResponse,
    GetTradingStatusesResponse,
    GetLastTradesResponse,
    GetClosePricesResponse,
    // users
    GetAccountsResponse,
    GetUserTariffResponse,
    Account,
    // operations
    OperationsResponse,
    PortfolioResponse,
    PositionsResponse,
    PositionsSecurities,
    WithdrawLimitsResponse,
    GetOperationsByCursorResponse,
    // orders
    PostOrderResponse,
    PostOrderAsyncResponse,
    CancelOrderResponse,
    OrderState,
    GetOrdersResponse,
    GetMaxLotsResponse,
    // stop orders
    PostStopOrderResponse,
    GetStopOrdersResponse,
    CancelStopOrderResponse,
    // sandbox
    OpenSandboxAccountResponse,
    CloseSandboxAccountResponse,
    SandboxPayInResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_pool_resolves_generated_message_names() {
        let pool = descriptor_pool().expect("descriptor pool");
        let message = invest::PostOrderResponse::default();
        assert!(pool.get_message_by_name(message.message_name()).is_some());
        assert!(pool
            .get_message_by_name("google.protobuf.Timestamp")
            .is_some());
    }

    #[test]
    fn package_constant_matches_message_prefix() {
        let name = invest::Brand::default().message_name();
        assert_eq!(name, format!("{PACKAGE}.Brand"));
    }
}
