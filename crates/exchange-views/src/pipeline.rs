use alloy_primitives::Address;
use exchange_core::types::{DecoratedOrder, FillRecord, Order, TradingPair};
use exchange_store::{ExchangeSnapshot, ExchangeStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use crate::aggregate::{OrderBook, PriceChart};
use crate::cache::{ViewKey, ViewMemo};
use crate::config::PipelineConfig;
use crate::views::{self, AccountEvent, ViewContext};

/// What the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Selection {
    pair: TradingPair,
    account: Option<Address>,
}

/// Memoizing front for the view builders.
///
/// Reads snapshots from the store on every call; a view is recomputed only
/// when a stream it reads has grown or the selection it depends on changed.
/// The memo lives as long as the pipeline.
pub struct ViewPipeline {
    store: Arc<ExchangeStore>,
    config: PipelineConfig,
    selection: RwLock<Selection>,

    order_book: ViewMemo<OrderBook>,
    price_chart: ViewMemo<PriceChart>,
    trade_tape: ViewMemo<Vec<DecoratedOrder<FillRecord>>>,
    my_open_orders: ViewMemo<Vec<DecoratedOrder<Order>>>,
    my_filled_orders: ViewMemo<Vec<DecoratedOrder<FillRecord>>>,
    my_events: ViewMemo<Vec<AccountEvent>>,
}

impl ViewPipeline {
    pub fn new(store: Arc<ExchangeStore>, config: PipelineConfig) -> Self {
        Self {
            store,
            config,
            selection: RwLock::new(Selection::default()),
            order_book: ViewMemo::new("order_book"),
            price_chart: ViewMemo::new("price_chart"),
            trade_tape: ViewMemo::new("trade_tape"),
            my_open_orders: ViewMemo::new("my_open_orders"),
            my_filled_orders: ViewMemo::new("my_filled_orders"),
            my_events: ViewMemo::new("my_events"),
        }
    }

    /// Set the selection in one step
    pub fn with_selection(self, pair: TradingPair, account: Option<Address>) -> Self {
        *self.selection.write() = Selection { pair, account };
        self
    }

    /// Get reference to the store
    pub fn store(&self) -> &Arc<ExchangeStore> {
        &self.store
    }

    /// Get reference to config
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn pair(&self) -> TradingPair {
        self.selection.read().pair
    }

    pub fn account(&self) -> Option<Address> {
        self.selection.read().account
    }

    pub fn set_pair(&self, pair: TradingPair) {
        let mut selection = self.selection.write();
        if selection.pair != pair {
            info!(base = ?pair.base, quote = ?pair.quote, "Trading pair changed");
            selection.pair = pair;
        }
    }

    pub fn set_account(&self, account: Option<Address>) {
        let mut selection = self.selection.write();
        if selection.account != account {
            info!(account = ?account, "Account changed");
            selection.account = account;
        }
    }

    /// Drop every memoized view
    pub fn invalidate(&self) {
        self.order_book.invalidate();
        self.price_chart.invalidate();
        self.trade_tape.invalidate();
        self.my_open_orders.invalidate();
        self.my_filled_orders.invalidate();
        self.my_events.invalidate();
    }

    /// Snapshot, context and memo keys for one call
    fn prepare(&self) -> (ExchangeSnapshot, ViewContext, ViewKey) {
        let selection = *self.selection.read();
        let snapshot = self.store.snapshot();
        let ctx = ViewContext::new(selection.pair, selection.account, &self.config);
        let key = ViewKey {
            versions: snapshot.versions(),
            pair: selection.pair,
            account: None,
        };
        (snapshot, ctx, key)
    }

    pub fn order_book(&self) -> Option<Arc<OrderBook>> {
        let (snapshot, ctx, key) = self.prepare();
        self.order_book
            .get_or_compute(key, || views::order_book(&snapshot, &ctx))
    }

    pub fn price_chart(&self) -> Option<Arc<PriceChart>> {
        let (snapshot, ctx, key) = self.prepare();
        self.price_chart
            .get_or_compute(key, || views::price_chart(&snapshot, &ctx))
    }

    pub fn trade_tape(&self) -> Option<Arc<Vec<DecoratedOrder<FillRecord>>>> {
        let (snapshot, ctx, key) = self.prepare();
        self.trade_tape
            .get_or_compute(key, || views::trade_tape(&snapshot, &ctx))
    }

    pub fn my_open_orders(&self) -> Option<Arc<Vec<DecoratedOrder<Order>>>> {
        let (snapshot, ctx, key) = self.prepare();
        let key = ViewKey {
            account: ctx.account,
            ..key
        };
        self.my_open_orders
            .get_or_compute(key, || views::my_open_orders(&snapshot, &ctx))
    }

    pub fn my_filled_orders(&self) -> Option<Arc<Vec<DecoratedOrder<FillRecord>>>> {
        let (snapshot, ctx, key) = self.prepare();
        let key = ViewKey {
            account: ctx.account,
            ..key
        };
        self.my_filled_orders
            .get_or_compute(key, || views::my_filled_orders(&snapshot, &ctx))
    }

    /// Account activity does not depend on the pair
    pub fn my_events(&self) -> Option<Arc<Vec<AccountEvent>>> {
        let (snapshot, ctx, key) = self.prepare();
        let key = ViewKey {
            pair: TradingPair::default(),
            account: ctx.account,
            ..key
        };
        self.my_events
            .get_or_compute(key, || views::my_events(&snapshot, &ctx))
    }
}
