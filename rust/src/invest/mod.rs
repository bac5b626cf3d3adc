//! Client side of the broker API: one shared channel and a declarative table
//! mapping every supported remote method to its generated client.

mod channel;

use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::Status;

use crate::grpc_proto::invest;
use crate::grpc_proto::invest::instruments_service_client::InstrumentsServiceClient;
use crate::grpc_proto::invest::market_data_service_client::MarketDataServiceClient;
use crate::grpc_proto::invest::operations_service_client::OperationsServiceClient;
use crate::grpc_proto::invest::orders_service_client::OrdersServiceClient;
use crate::grpc_proto::invest::sandbox_service_client::SandboxServiceClient;
use crate::grpc_proto::invest::stop_orders_service_client::StopOrdersServiceClient;
use crate::grpc_proto::invest::users_service_client::UsersServiceClient;
use crate::grpc_proto::StructuredMessage;

pub use channel::{connect_lazy, AuthInterceptor};

type AuthedChannel = InterceptedService<Channel, AuthInterceptor>;

/// The seam between tool dispatch and the network.
///
/// Exactly one remote attempt is made per `call`; failures come back as the
/// raw `tonic::Status`.
#[tonic::async_trait]
pub trait InvestFacade: Send + Sync {
    async fn call(&self, call: RpcCall) -> Result<Box<dyn StructuredMessage>, Status>;
}

macro_rules! rpc_table {
    (
        $(
            $service:ident via $client:ident {
                $( $variant:ident ( $request:ident ) => $method:ident ),* $(,)?
            }
        )*
    ) => {
        /// A fully built request for one remote method.
        #[derive(Debug, Clone, PartialEq)]
        pub enum RpcCall {
            $( $( $variant(invest::$request), )* )*
        }

        impl RpcCall {
            /// `Service/Method`, as it appears in the gRPC path.
            pub fn method(&self) -> &'static str {
                match self {
                    $( $( Self::$variant(_) => concat!(stringify!($service), "/", stringify!($variant)), )* )*
                }
            }
        }

        impl InvestApi {
            async fn dispatch(&self, call: RpcCall) -> Result<Box<dyn StructuredMessage>, Status> {
                match call {
                    $( $(
                        RpcCall::$variant(request) => {
                            let response = self.$client().$method(request).await?;
                            let message: Box<dyn StructuredMessage> = Box::new(response.into_inner());
                            Ok(message)
                        }
                    )* )*
                }
            }
        }
    };
}

rpc_table! {
    InstrumentsService via instruments {
        GetBrandBy(GetBrandRequest) => get_brand_by,
        GetBrands(GetBrandsRequest) => get_brands,
        GetAssetFundamentals(GetAssetFundamentalsRequest) => get_asset_fundamentals,
        GetAssetReports(GetAssetReportsRequest) => get_asset_reports,
        GetConsensusForecasts(GetConsensusForecastsRequest) => get_consensus_forecasts,
        GetForecastBy(GetForecastRequest) => get_forecast_by,
        GetRiskRates(RiskRatesRequest) => get_risk_rates,
    }
    MarketDataService via market_data {
        GetCandles(GetCandlesRequest) => get_candles,
        GetOrderBook(GetOrderBookRequest) => get_order_book,
        GetTradingStatus(GetTradingStatusRequest) => get_trading_status,
        GetTradingStatuses(GetTradingStatusesRequest) => get_trading_statuses,
        GetLastTrades(GetLastTradesRequest) => get_last_trades,
        GetClosePrices(GetClosePricesRequest) => get_close_prices,
    }
    UsersService via users {
        GetAccounts(GetAccountsRequest) => get_accounts,
        GetUserTariff(GetUserTariffRequest) => get_user_tariff,
    }
    OperationsService via operations {
        GetPortfolio(PortfolioRequest) => get_portfolio,
        GetPositions(PositionsRequest) => get_positions,
    }
    OrdersService via orders {
        PostOrder(PostOrderRequest) => post_order,
        PostOrderAsync(PostOrderAsyncRequest) => post_order_async,
        CancelOrder(CancelOrderRequest) => cancel_order,
        GetOrderState(GetOrderStateRequest) => get_order_state,
        GetOrders(GetOrdersRequest) => get_orders,
    }
    StopOrdersService via stop_orders {
        PostStopOrder(PostStopOrderRequest) => post_stop_order,
        GetStopOrders(GetStopOrdersRequest) => get_stop_orders,
        CancelStopOrder(CancelStopOrderRequest) => cancel_stop_order,
    }
    SandboxService via sandbox {
        OpenSandboxAccount(OpenSandboxAccountRequest) => open_sandbox_account,
        GetSandboxAccounts(GetAccountsRequest) => get_sandbox_accounts,
        CloseSandboxAccount(CloseSandboxAccountRequest) => close_sandbox_account,
        PostSandboxOrder(PostOrderRequest) => post_sandbox_order,
        ReplaceSandboxOrder(ReplaceOrderRequest) => replace_sandbox_order,
        GetSandboxOrders(GetOrdersRequest) => get_sandbox_orders,
        CancelSandboxOrder(CancelOrderRequest) => cancel_sandbox_order,
        GetSandboxOrderState(GetOrderStateRequest) => get_sandbox_order_state,
        GetSandboxPositions(PositionsRequest) => get_sandbox_positions,
        GetSandboxOperations(OperationsRequest) => get_sandbox_operations,
        GetSandboxOperationsByCursor(GetOperationsByCursorRequest) => get_sandbox_operations_by_cursor,
        GetSandboxPortfolio(PortfolioRequest) => get_sandbox_portfolio,
        SandboxPayIn(SandboxPayInRequest) => sandbox_pay_in,
        GetSandboxWithdrawLimits(WithdrawLimitsRequest) => get_sandbox_withdraw_limits,
        GetSandboxMaxLots(GetMaxLotsRequest) => get_sandbox_max_lots,
    }
}

/// Production facade backed by the generated tonic clients.
#[derive(Clone)]
pub struct InvestApi {
    channel: Channel,
    auth: AuthInterceptor,
}

impl InvestApi {
    pub fn new(channel: Channel, auth: AuthInterceptor) -> Self {
        Self { channel, auth }
    }

    pub fn connect_lazy(target: &str, token: &str, app_name: &str) -> Result<Self, String> {
        let auth = AuthInterceptor::new(token, app_name)?;
        let channel = connect_lazy(target)?;
        Ok(Self::new(channel, auth))
    }

    fn authed(&self) -> AuthedChannel {
        InterceptedService::new(self.channel.clone(), self.auth.clone())
    }

    fn instruments(&self) -> InstrumentsServiceClient<AuthedChannel> {
        InstrumentsServiceClient::new(self.authed())
    }

    fn market_data(&self) -> MarketDataServiceClient<AuthedChannel> {
        MarketDataServiceClient::new(self.authed())
    }

    fn users(&self) -> UsersServiceClient<AuthedChannel> {
        UsersServiceClient::new(self.authed())
    }

    fn operations(&self) -> OperationsServiceClient<AuthedChannel> {
        OperationsServiceClient::new(self.authed())
    }

    fn orders(&self) -> OrdersServiceClient<AuthedChannel> {
        OrdersServiceClient::new(self.authed())
    }

    fn stop_orders(&self) -> StopOrdersServiceClient<AuthedChannel> {
        StopOrdersServiceClient::new(self.authed())
    }

    fn sandbox(&self) -> SandboxServiceClient<AuthedChannel> {
        SandboxServiceClient::new(self.authed())
    }
}

#[tonic::async_trait]
impl InvestFacade for InvestApi {
    async fn call(&self, call: RpcCall) -> Result<Box<dyn StructuredMessage>, Status> {
        let method = call.method();
        tracing::debug!("Calling {method}");
        let result = self.dispatch(call).await;
        if let Err(status) = &result {
            tracing::debug!("{method} failed: {:?} {}", status.code(), status.message());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_follow_grpc_paths() {
        let call = RpcCall::GetCandles(invest::GetCandlesRequest::default());
        assert_eq!(call.method(), "MarketDataService/GetCandles");

        let call = RpcCall::GetSandboxAccounts(invest::GetAccountsRequest::default());
        assert_eq!(call.method(), "SandboxService/GetSandboxAccounts");
    }
}
