//! View builders: reconcile, filter to the pair, decorate, aggregate.
//!
//! Every builder returns `None` while either asset of the pair is unresolved,
//! and account views also while no account is connected. Nothing here panics
//! or returns an error; bad records are logged and left out.

use alloy_primitives::Address;
use chrono::FixedOffset;
use exchange_candles::{CandleAggregator, CandleInterval};
use exchange_core::types::{
    CancelRecord, DecoratedOrder, FillRecord, Order, ResolvedPair, TradeRecord, TradingPair,
};
use exchange_store::ExchangeSnapshot;
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{
    build_price_chart, color_trade_tape, group_order_book, sort_ascending, sort_descending,
    OrderBook, PriceChart,
};
use crate::config::PipelineConfig;
use crate::counters;
use crate::decorate::{
    decorate_my_filled_order, decorate_my_open_order, decorate_order, decorate_order_book_order,
};
use crate::reconcile::open_orders;

/// Selection state a view is computed against
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    pub pair: TradingPair,
    pub account: Option<Address>,
    pub utc_offset: FixedOffset,
    pub candle_interval: CandleInterval,
}

impl ViewContext {
    pub fn new(pair: TradingPair, account: Option<Address>, config: &PipelineConfig) -> Self {
        Self {
            pair,
            account,
            utc_offset: config.utc_offset,
            candle_interval: config.candle_interval,
        }
    }

    fn resolved_pair(&self, view: &'static str) -> Option<ResolvedPair> {
        let pair = self.pair.resolve();
        if pair.is_none() {
            debug!(view, "Trading pair unresolved, skipping view");
        }
        pair
    }

    fn connected_account(&self, view: &'static str) -> Option<Address> {
        if self.account.is_none() {
            debug!(view, "No account connected, skipping view");
        }
        self.account
    }
}

/// Decorate records of the pair, dropping (and logging) any that fail
fn decorate_in_pair<'a, R, I>(
    records: I,
    pair: &ResolvedPair,
    offset: &FixedOffset,
    view: &'static str,
) -> Vec<DecoratedOrder<R>>
where
    R: TradeRecord + Clone + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|r| r.in_pair(pair))
        .filter_map(|r| match decorate_order(r, pair, offset) {
            Ok(decorated) => Some(decorated),
            Err(e) => {
                warn!(view, order_id = %r.id(), error = %e, "Record excluded from view");
                counters::records_excluded("decode", 1);
                None
            }
        })
        .collect()
}

/// Drop records whose price is undefined; they cannot be ranked or charted
fn without_degenerate<R: TradeRecord>(
    orders: Vec<DecoratedOrder<R>>,
    view: &'static str,
) -> Vec<DecoratedOrder<R>> {
    let (kept, dropped): (Vec<_>, Vec<_>) = orders.into_iter().partition(|o| !o.is_degenerate());
    if !dropped.is_empty() {
        let ids: Vec<String> = dropped.iter().map(|o| o.record.id().to_string()).collect();
        warn!(view, ids = ?ids, "Zero base amount, price undefined; excluded from aggregate");
        counters::records_excluded("degenerate_price", dropped.len() as u64);
    }
    kept
}

pub fn order_book(snapshot: &ExchangeSnapshot, ctx: &ViewContext) -> Option<OrderBook> {
    const VIEW: &str = "order_book";
    let pair = ctx.resolved_pair(VIEW)?;

    let open = open_orders(&snapshot.orders, &snapshot.fills, &snapshot.cancels);
    let decorated = decorate_in_pair(&open, &pair, &ctx.utc_offset, VIEW);
    let decorated = without_degenerate(decorated, VIEW)
        .into_iter()
        .map(|o| decorate_order_book_order(o, &pair))
        .collect();

    Some(group_order_book(decorated))
}

pub fn price_chart(snapshot: &ExchangeSnapshot, ctx: &ViewContext) -> Option<PriceChart> {
    const VIEW: &str = "price_chart";
    let pair = ctx.resolved_pair(VIEW)?;

    let mut fills = decorate_in_pair(snapshot.fills.iter(), &pair, &ctx.utc_offset, VIEW);
    sort_ascending(&mut fills);
    let fills = without_degenerate(fills, VIEW);

    let aggregator = CandleAggregator::new(ctx.candle_interval, ctx.utc_offset);
    Some(build_price_chart(&fills, &aggregator))
}

/// All fills of the pair, newest first, colored by price move
pub fn trade_tape(
    snapshot: &ExchangeSnapshot,
    ctx: &ViewContext,
) -> Option<Vec<DecoratedOrder<FillRecord>>> {
    const VIEW: &str = "trade_tape";
    let pair = ctx.resolved_pair(VIEW)?;

    let mut fills = decorate_in_pair(snapshot.fills.iter(), &pair, &ctx.utc_offset, VIEW);
    sort_ascending(&mut fills);
    let fills = without_degenerate(fills, VIEW);

    Some(color_trade_tape(fills))
}

/// Open orders submitted by the connected account, newest first
pub fn my_open_orders(
    snapshot: &ExchangeSnapshot,
    ctx: &ViewContext,
) -> Option<Vec<DecoratedOrder<Order>>> {
    const VIEW: &str = "my_open_orders";
    let pair = ctx.resolved_pair(VIEW)?;
    let account = ctx.connected_account(VIEW)?;

    let open = open_orders(&snapshot.orders, &snapshot.fills, &snapshot.cancels);
    let mine = open.iter().filter(|o| o.user == account);

    let mut orders: Vec<_> = decorate_in_pair(mine, &pair, &ctx.utc_offset, VIEW)
        .into_iter()
        .map(|o| decorate_my_open_order(o, &pair))
        .collect();
    sort_descending(&mut orders);
    Some(orders)
}

/// Fills the connected account created or took, newest first
pub fn my_filled_orders(
    snapshot: &ExchangeSnapshot,
    ctx: &ViewContext,
) -> Option<Vec<DecoratedOrder<FillRecord>>> {
    const VIEW: &str = "my_filled_orders";
    let pair = ctx.resolved_pair(VIEW)?;
    let account = ctx.connected_account(VIEW)?;

    let mine = snapshot.fills.iter().filter(|f| f.involves(&account));

    let mut fills = decorate_in_pair(mine, &pair, &ctx.utc_offset, VIEW);
    sort_descending(&mut fills);
    Some(
        fills
            .into_iter()
            .map(|f| decorate_my_filled_order(f, &account, &pair))
            .collect(),
    )
}

/// One entry of an account's activity feed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "args")]
pub enum AccountEvent {
    Order(Order),
    Cancel(CancelRecord),
    Trade(FillRecord),
}

impl AccountEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            AccountEvent::Order(o) => o.timestamp,
            AccountEvent::Cancel(c) => c.timestamp,
            AccountEvent::Trade(f) => f.timestamp,
        }
    }
}

/// Every event the connected account took part in, across all pairs, newest first
pub fn my_events(snapshot: &ExchangeSnapshot, ctx: &ViewContext) -> Option<Vec<AccountEvent>> {
    let account = ctx.connected_account("my_events")?;

    let mut events: Vec<AccountEvent> = snapshot
        .orders
        .iter()
        .filter(|o| o.user == account)
        .cloned()
        .map(AccountEvent::Order)
        .chain(
            snapshot
                .cancels
                .iter()
                .filter(|c| c.user == account)
                .cloned()
                .map(AccountEvent::Cancel),
        )
        .chain(
            snapshot
                .fills
                .iter()
                .filter(|f| f.involves(&account))
                .cloned()
                .map(AccountEvent::Trade),
        )
        .collect();

    events.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    Some(events)
}
