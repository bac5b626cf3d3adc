use crate::grpc_proto::invest::{
    GetCandlesRequest, GetClosePricesRequest, GetLastTradesRequest, GetOrderBookRequest,
    GetTradingStatusRequest, GetTradingStatusesRequest, InstrumentClosePriceRequest,
};
use crate::invest::RpcCall;
use crate::tool_api::{ParamKind, ParamSpec, Profile, ToolArgs, ToolCallError, ToolSpec};

use super::{from_epoch, instrument_id, to_epoch};

const CANDLE_INTERVAL: &str = "CandleInterval";

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "getCandles",
            Profile::Read,
            "Get historical candles for an instrument over [from,to] epoch seconds with the specified interval (MarketDataService.GetCandles). Time is UTC. Returns OHLCV series.",
            get_candles,
        )
        .params([
            instrument_id(),
            from_epoch(true),
            to_epoch(true),
            ParamSpec::required(
                "interval",
                ParamKind::Enum(CANDLE_INTERVAL),
                "Candle interval (interval), e.g. CANDLE_INTERVAL_HOUR.",
            ),
        ]),
        ToolSpec::new(
            "getOrderBook",
            Profile::Read,
            "Get the order book (depth N) for an instrument (MarketDataService.GetOrderBook). Returns bids/asks snapshots at the requested depth.",
            get_order_book,
        )
        .params([
            instrument_id(),
            ParamSpec::required("depth", ParamKind::Int32, "Order book depth (depth)."),
        ]),
        ToolSpec::new(
            "getTradingStatuses",
            Profile::Read,
            "Get trading statuses for multiple instruments (MarketDataService.GetTradingStatuses). Useful to check if instruments are currently tradable.",
            get_trading_statuses,
        )
        .param(ParamSpec::required(
            "instrumentIds",
            ParamKind::StringList,
            "Instrument identifiers (instrument_id): FIGI or instrument_uid.",
        )),
        ToolSpec::new(
            "getLastTrades",
            Profile::Read,
            "Get last trades (tick trades) for an instrument over [from,to] epoch seconds (MarketDataService.GetLastTrades).",
            get_last_trades,
        )
        .params([instrument_id(), from_epoch(true), to_epoch(true)]),
        ToolSpec::new(
            "getClosePrices",
            Profile::Read,
            "Get the latest close price for an instrument (MarketDataService.GetClosePrices). Returns InstrumentClosePrice entries.",
            get_close_prices,
        )
        .param(instrument_id()),
        ToolSpec::new(
            "getTradingStatus",
            Profile::Read,
            "Get trading status for a single instrument (MarketDataService.GetTradingStatus).",
            get_trading_status,
        )
        .param(instrument_id()),
    ]
}

fn get_candles(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetCandles(GetCandlesRequest {
        from: Some(args.timestamp("fromEpochSeconds")?),
        to: Some(args.timestamp("toEpochSeconds")?),
        interval: args.enumeration("interval", CANDLE_INTERVAL)?,
        instrument_id: args.string("instrumentId")?,
    }))
}

fn get_order_book(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetOrderBook(GetOrderBookRequest {
        depth: args.int32("depth")?,
        instrument_id: args.string("instrumentId")?,
    }))
}

fn get_trading_statuses(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetTradingStatuses(GetTradingStatusesRequest {
        instrument_id: args.string_list("instrumentIds")?,
    }))
}

fn get_last_trades(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetLastTrades(GetLastTradesRequest {
        from: Some(args.timestamp("fromEpochSeconds")?),
        to: Some(args.timestamp("toEpochSeconds")?),
        instrument_id: args.string("instrumentId")?,
    }))
}

fn get_close_prices(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetClosePrices(GetClosePricesRequest {
        instruments: vec![InstrumentClosePriceRequest {
            instrument_id: args.string("instrumentId")?,
        }],
    }))
}

fn get_trading_status(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetTradingStatus(GetTradingStatusRequest {
        instrument_id: args.string("instrumentId")?,
    }))
}
