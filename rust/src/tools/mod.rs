//! The declarative tool catalog, one module per broker service.

mod instruments;
mod market_data;
mod operations;
mod orders;
mod sandbox;
mod stop_orders;
mod users;

use crate::tool_api::{ParamKind, ParamSpec, ToolSpec};

/// Every tool this server knows about, regardless of profile.
pub fn catalog() -> Vec<ToolSpec> {
    let mut tools = Vec::new();
    tools.extend(instruments::tools());
    tools.extend(market_data::tools());
    tools.extend(users::tools());
    tools.extend(operations::tools());
    tools.extend(sandbox::tools());
    tools.extend(orders::tools());
    tools.extend(stop_orders::tools());
    tools
}

pub(crate) fn account_id() -> ParamSpec {
    ParamSpec::required("accountId", ParamKind::String, "Account identifier (account_id).")
}

pub(crate) fn instrument_id() -> ParamSpec {
    ParamSpec::required(
        "instrumentId",
        ParamKind::String,
        "Instrument identifier (instrument_id): FIGI or instrument_uid.",
    )
}

pub(crate) fn order_id() -> ParamSpec {
    ParamSpec::required("orderId", ParamKind::String, "Order ID (order_id).")
}

pub(crate) fn from_epoch(presence_required: bool) -> ParamSpec {
    let description = "Start of the period in UTC as UNIX seconds (from).";
    if presence_required {
        ParamSpec::required("fromEpochSeconds", ParamKind::EpochSeconds, description)
    } else {
        ParamSpec::optional("fromEpochSeconds", ParamKind::EpochSeconds, description)
    }
}

pub(crate) fn to_epoch(presence_required: bool) -> ParamSpec {
    let description = "End of the period in UTC as UNIX seconds (to).";
    if presence_required {
        ParamSpec::required("toEpochSeconds", ParamKind::EpochSeconds, description)
    } else {
        ParamSpec::optional("toEpochSeconds", ParamKind::EpochSeconds, description)
    }
}

/// `(units, nano)` pair forming one optional `Quotation` field.
pub(crate) fn price_group(
    units: &'static str,
    nano: &'static str,
    group: &'static str,
) -> [ParamSpec; 2] {
    [
        ParamSpec::grouped(
            units,
            ParamKind::Int64,
            group,
            "Integer part of the price (Quotation.units).",
        ),
        ParamSpec::grouped(
            nano,
            ParamKind::Int32,
            group,
            "Fractional part of the price in billionths (Quotation.nano).",
        ),
    ]
}
