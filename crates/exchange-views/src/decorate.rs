use alloy_primitives::Address;
use chrono::{DateTime, FixedOffset};
use exchange_core::types::{
    to_decimal_units, DecoratedOrder, FillRecord, Order, OrderSign, PriceColor, ResolvedPair,
    TradeRecord,
};
use exchange_core::Result;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on unit prices
pub const PRICE_PRECISION: u32 = 4;

/// `h:mm:ssa d MMM D`: 12-hour clock, am/pm, weekday number (Sunday = 0),
/// short month, day of month
const TIMESTAMP_FORMAT: &str = "%-I:%M:%S%P %w %b %-d";

/// Quote-side price with half-away-from-zero rounding. `None` when the
/// denominator is zero.
pub fn unit_price(token0_amount: Decimal, token1_amount: Decimal) -> Option<Decimal> {
    token1_amount
        .checked_div(token0_amount)
        .map(|p| p.round_dp_with_strategy(PRICE_PRECISION, RoundingStrategy::MidpointAwayFromZero))
}

pub fn format_timestamp(timestamp: u64, offset: &FixedOffset) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.with_timezone(offset).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// First decoration pass: amounts, unit price and display time.
///
/// When the record gives the quote asset its give amount becomes
/// `token0_amount`; otherwise the get amount does. The price is
/// `token1_amount / token0_amount`.
pub fn decorate_order<R>(
    record: &R,
    pair: &ResolvedPair,
    offset: &FixedOffset,
) -> Result<DecoratedOrder<R>>
where
    R: TradeRecord + Clone,
{
    let (token0, token1) = if record.token_give() == pair.quote {
        (record.amount_give(), record.amount_get())
    } else {
        (record.amount_get(), record.amount_give())
    };

    let token0_amount = to_decimal_units(token0)?;
    let token1_amount = to_decimal_units(token1)?;

    Ok(DecoratedOrder {
        record: record.clone(),
        token0_amount,
        token1_amount,
        token_price: unit_price(token0_amount, token1_amount),
        formatted_timestamp: format_timestamp(record.timestamp(), offset),
        order_type: None,
        order_type_class: None,
        order_fill_action: None,
        order_sign: None,
        token_price_class: None,
    })
}

/// Direction, color and the action a taker would perform against the order
pub fn decorate_order_book_order(
    mut order: DecoratedOrder<Order>,
    pair: &ResolvedPair,
) -> DecoratedOrder<Order> {
    let side = order.record.side(pair);
    order.order_type = Some(side);
    order.order_type_class = Some(PriceColor::for_side(side));
    order.order_fill_action = Some(side.opposite());
    order
}

pub fn decorate_my_open_order(
    mut order: DecoratedOrder<Order>,
    pair: &ResolvedPair,
) -> DecoratedOrder<Order> {
    let side = order.record.side(pair);
    order.order_type = Some(side);
    order.order_type_class = Some(PriceColor::for_side(side));
    order
}

/// Direction as seen by `account`: the creator keeps the order's side, the
/// filler took the opposite one.
pub fn decorate_my_filled_order(
    mut order: DecoratedOrder<FillRecord>,
    account: &Address,
    pair: &ResolvedPair,
) -> DecoratedOrder<FillRecord> {
    let creator_side = order.record.side(pair);
    let side = if order.record.creator == *account {
        creator_side
    } else {
        creator_side.opposite()
    };

    order.order_type = Some(side);
    order.order_type_class = Some(PriceColor::for_side(side));
    order.order_sign = Some(OrderSign::for_side(side));
    order
}

/// Price move relative to the previous fill in time order
pub fn decorate_filled_order(
    mut order: DecoratedOrder<FillRecord>,
    previous: &DecoratedOrder<FillRecord>,
) -> DecoratedOrder<FillRecord> {
    order.token_price_class = Some(token_price_class(&order, previous));
    order
}

fn token_price_class(
    order: &DecoratedOrder<FillRecord>,
    previous: &DecoratedOrder<FillRecord>,
) -> PriceColor {
    if order.record.id == previous.record.id {
        return PriceColor::Green;
    }

    if previous.token_price <= order.token_price {
        PriceColor::Green
    } else {
        PriceColor::Red
    }
}
