use crate::grpc_proto::invest::{
    GetAssetFundamentalsRequest, GetAssetReportsRequest, GetBrandRequest, GetBrandsRequest,
    GetConsensusForecastsRequest, GetForecastRequest, Page, RiskRatesRequest,
};
use crate::invest::RpcCall;
use crate::tool_api::{ParamKind, ParamSpec, Profile, ToolArgs, ToolCallError, ToolSpec};

use super::{from_epoch, instrument_id, to_epoch};

pub(super) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "getBrandBy",
            Profile::Read,
            "Get brand information by brand UID (InstrumentsService.GetBrandBy). Returns brand metadata for grouping instruments under the same brand.",
            get_brand_by,
        )
        .param(ParamSpec::required("uid", ParamKind::String, "Brand UID.")),
        ToolSpec::new(
            "getBrands",
            Profile::Read,
            "List brands available in the catalog (InstrumentsService.GetBrands). Supports mapping instruments to their brands.",
            get_brands,
        ),
        ToolSpec::new(
            "getAssetFundamentals",
            Profile::Read,
            "Get fundamental metrics for assets by a list of asset UIDs (InstrumentsService.GetAssetFundamentals). Returns financial indicators for analysis.",
            get_asset_fundamentals,
        )
        .param(ParamSpec::required(
            "assetUids",
            ParamKind::StringList,
            "Asset UIDs (assets).",
        )),
        ToolSpec::new(
            "getAssetReports",
            Profile::Read,
            "Get issuer reports for an instrument within an optional period [from,to] epoch seconds (InstrumentsService.GetAssetReports). Returns financial and corporate reports.",
            get_asset_reports,
        )
        .params([instrument_id(), from_epoch(false), to_epoch(false)]),
        ToolSpec::new(
            "getConsensusForecasts",
            Profile::Read,
            "Get analyst consensus forecasts with optional pagination (InstrumentsService.GetConsensusForecasts). Returns target prices and recommendations summary.",
            get_consensus_forecasts,
        )
        .params([
            ParamSpec::optional("limit", ParamKind::Int32, "Page size (paging.limit)."),
            ParamSpec::optional(
                "pageNumber",
                ParamKind::Int32,
                "Zero-based page number (paging.page_number).",
            ),
        ]),
        ToolSpec::new(
            "getForecastBy",
            Profile::Read,
            "Get detailed analyst forecasts for a specific instrument (InstrumentsService.GetForecastBy).",
            get_forecast_by,
        )
        .param(instrument_id()),
        ToolSpec::new(
            "getRiskRates",
            Profile::Read,
            "Get exchange risk rates and parameters (InstrumentsService.GetRiskRates). Useful for margin requirements and risk calculations.",
            get_risk_rates,
        ),
    ]
}

fn get_brand_by(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetBrandBy(GetBrandRequest {
        id: args.string("uid")?,
    }))
}

fn get_brands(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetBrands(GetBrandsRequest::default()))
}

fn get_asset_fundamentals(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetAssetFundamentals(GetAssetFundamentalsRequest {
        assets: args.string_list("assetUids")?,
    }))
}

fn get_asset_reports(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetAssetReports(GetAssetReportsRequest {
        instrument_id: args.string("instrumentId")?,
        from: args.opt_timestamp("fromEpochSeconds")?,
        to: args.opt_timestamp("toEpochSeconds")?,
    }))
}

fn get_consensus_forecasts(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    let limit = args.opt_int32("limit")?;
    let page_number = args.opt_int32("pageNumber")?;
    // Paging is sent when either half is given; the other stays at zero.
    let paging = (limit.is_some() || page_number.is_some()).then(|| Page {
        limit: limit.unwrap_or_default(),
        page_number: page_number.unwrap_or_default(),
    });
    Ok(RpcCall::GetConsensusForecasts(GetConsensusForecastsRequest {
        paging,
    }))
}

fn get_forecast_by(args: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetForecastBy(GetForecastRequest {
        instrument_id: args.string("instrumentId")?,
    }))
}

fn get_risk_rates(_: &ToolArgs<'_>) -> Result<RpcCall, ToolCallError> {
    Ok(RpcCall::GetRiskRates(RiskRatesRequest::default()))
}
