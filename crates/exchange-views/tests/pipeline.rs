use alloy_primitives::{Address, Log, U256};
use alloy_sol_types::SolEvent;
use chrono::FixedOffset;
use exchange_candles::CandleInterval;
use exchange_core::events;
use exchange_core::types::raw::RawEventLog;
use exchange_core::types::{OrderSide, OrderSign, PriceColor, TradingPair};
use exchange_store::ExchangeStore;
use exchange_views::{EventProcessor, PipelineConfig, ViewPipeline};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

const START: u64 = 1_700_000_000;
const ONE: u128 = 1_000_000_000_000_000_000;

fn base() -> Address {
    Address::repeat_byte(0x01)
}

fn quote() -> Address {
    Address::repeat_byte(0x02)
}

fn maker() -> Address {
    Address::repeat_byte(0xaa)
}

fn taker() -> Address {
    Address::repeat_byte(0xbb)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn utc_config() -> PipelineConfig {
    PipelineConfig::new(CandleInterval::Hour1, FixedOffset::east_opt(0).unwrap())
}

fn pipeline_for(store: Arc<ExchangeStore>, account: Option<Address>) -> ViewPipeline {
    ViewPipeline::new(store, utc_config()).with_selection(TradingPair::new(base(), quote()), account)
}

/// Buy orders give one quote unit for `price` base units; sells the reverse
fn history() -> RawEventLog {
    let json = format!(
        r#"{{
            "orders": [
                {{"id": 1, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p10}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t0}}},
                {{"id": 2, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p30}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t1}}},
                {{"id": 3, "user": "{taker}", "tokenGet": "{base}", "amountGet": "{p20}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t2}}},
                {{"id": "0x4", "user": "{maker}", "tokenGet": "{quote}", "amountGet": {one}, "tokenGive": "{base}", "amountGive": "{p5}", "timestamp": {t3}}},
                {{"id": 5, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p5}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t4}}},
                {{"id": 6, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p8}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t5}}},
                {{"id": 7, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p3}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t6}}},
                {{"id": 8, "user": "{maker}", "tokenGet": "{base}", "amountGet": "{p10}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {t7}}}
            ],
            "cancels": [
                {{"id": "8", "user": "{maker}", "timestamp": {t8}}}
            ],
            "fills": [
                {{"id": 5, "user": "{taker}", "creator": "{maker}", "tokenGet": "{base}", "amountGet": "{p5}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {f0}}},
                {{"id": 6, "user": "{taker}", "creator": "{maker}", "tokenGet": "{base}", "amountGet": "{p8}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {f1}}},
                {{"id": 7, "user": "{taker}", "creator": "{maker}", "tokenGet": "{base}", "amountGet": "{p3}", "tokenGive": "{quote}", "amountGive": {one}, "timestamp": {f2}}}
            ]
        }}"#,
        maker = maker(),
        taker = taker(),
        base = base(),
        quote = quote(),
        one = ONE,
        p3 = 3 * ONE,
        p5 = 5 * ONE,
        p8 = 8 * ONE,
        p10 = 10 * ONE,
        p20 = 20 * ONE,
        p30 = 30 * ONE,
        t0 = START,
        t1 = START + 1,
        t2 = START + 2,
        t3 = START + 3,
        t4 = START + 4,
        t5 = START + 5,
        t6 = START + 6,
        t7 = START + 7,
        t8 = START + 8,
        // Same hour as START (22:13 UTC)
        f0 = START + 100,
        f1 = START + 200,
        f2 = START + 300,
    );
    serde_json::from_str(&json).unwrap()
}

fn loaded_store() -> Arc<ExchangeStore> {
    let store = Arc::new(ExchangeStore::new());
    let stats = store.ingest(history());
    assert_eq!(stats.orders_accepted, 8);
    assert_eq!(stats.fills_accepted, 3);
    assert_eq!(stats.cancels_accepted, 1);
    assert_eq!(stats.rejected, 0);
    store
}

#[test]
fn test_order_book_from_history() {
    let pipeline = pipeline_for(loaded_store(), None);
    let book = pipeline.order_book().unwrap();

    // 5, 6 and 7 were filled, 8 was cancelled
    let buy_prices: Vec<Decimal> = book
        .buy_orders
        .iter()
        .map(|o| o.token_price.unwrap())
        .collect();
    assert_eq!(buy_prices, vec![dec("30"), dec("20"), dec("10")]);
    assert!(book
        .buy_orders
        .iter()
        .all(|o| o.order_fill_action == Some(OrderSide::Sell)));

    assert_eq!(book.sell_orders.len(), 1);
    assert_eq!(book.sell_orders[0].order_type_class, Some(PriceColor::Red));
}

#[test]
fn test_price_chart_and_tape_from_history() {
    let pipeline = pipeline_for(loaded_store(), None);

    let chart = pipeline.price_chart().unwrap();
    assert_eq!(chart.candles.len(), 1);
    let candle = &chart.candles[0];
    assert_eq!(
        (candle.open, candle.high, candle.low, candle.close),
        (dec("5"), dec("8"), dec("3"), dec("3"))
    );
    assert_eq!(candle.count, 3);
    assert_eq!(chart.last_price, dec("3"));
    assert_eq!(chart.last_price_change, OrderSign::Minus);

    let tape = pipeline.trade_tape().unwrap();
    let tape: Vec<(Decimal, PriceColor)> = tape
        .iter()
        .map(|f| (f.token_price.unwrap(), f.token_price_class.unwrap()))
        .collect();
    assert_eq!(
        tape,
        vec![
            (dec("3"), PriceColor::Red),
            (dec("8"), PriceColor::Green),
            (dec("5"), PriceColor::Green),
        ]
    );
}

#[test]
fn test_account_views_from_history() {
    let store = loaded_store();

    let maker_view = pipeline_for(store.clone(), Some(maker()));
    let open: Vec<u64> = maker_view
        .my_open_orders()
        .unwrap()
        .iter()
        .map(|o| o.record.timestamp - START)
        .collect();
    // Newest first: orders 4, 2 and 1
    assert_eq!(open, vec![3, 1, 0]);

    let made = maker_view.my_filled_orders().unwrap();
    assert_eq!(made.len(), 3);
    assert!(made.iter().all(|f| f.order_type == Some(OrderSide::Buy)));

    let taker_view = pipeline_for(store, Some(taker()));
    let taken = taker_view.my_filled_orders().unwrap();
    assert!(taken.iter().all(|f| f.order_type == Some(OrderSide::Sell)
        && f.order_sign == Some(OrderSign::Minus)));

    // Order 3 plus three fills
    assert_eq!(taker_view.my_events().unwrap().len(), 4);
}

#[test]
fn test_unresolved_pair_yields_nothing() {
    let store = loaded_store();
    let pipeline = ViewPipeline::new(store, utc_config())
        .with_selection(TradingPair::default(), Some(maker()));

    assert!(pipeline.order_book().is_none());
    assert!(pipeline.price_chart().is_none());
    assert!(pipeline.trade_tape().is_none());
    assert!(pipeline.my_open_orders().is_none());
    assert!(pipeline.my_filled_orders().is_none());

    pipeline.set_pair(TradingPair {
        base: Some(base()),
        quote: None,
    });
    assert!(pipeline.order_book().is_none());
}

#[test]
fn test_views_serialize_with_display_fields() {
    let pipeline = pipeline_for(loaded_store(), Some(taker()));

    let book = serde_json::to_value(&*pipeline.order_book().unwrap()).unwrap();
    let best = &book["buyOrders"][0];
    assert_eq!(best["orderType"], "buy");
    assert_eq!(best["orderTypeClass"], "#25CE8F");
    assert_eq!(best["orderFillAction"], "sell");
    assert_eq!(best["formattedTimestamp"], "10:13:21pm 2 Nov 14");
    assert!(best.get("orderSign").is_none());

    let mine = serde_json::to_value(&*pipeline.my_filled_orders().unwrap()).unwrap();
    assert_eq!(mine[0]["orderSign"], "-");
    assert_eq!(mine[0]["orderTypeClass"], "#F45353");
}

#[test]
fn test_contract_events_drive_views() {
    let store = Arc::new(ExchangeStore::new());
    let exchange = Address::repeat_byte(0xee);
    let processor = EventProcessor::new(store.clone()).with_exchange(exchange);
    let pipeline = pipeline_for(store, Some(maker()));

    let placed = events::Order {
        id: U256::from(1),
        user: maker(),
        tokenGet: base(),
        amountGet: U256::from(2 * ONE),
        tokenGive: quote(),
        amountGive: U256::from(ONE),
        timestamp: U256::from(START),
    };
    let log = Log {
        address: exchange,
        data: placed.encode_log_data(),
    };
    assert!(processor.process_log(&log).unwrap());

    let before = pipeline.order_book().unwrap();
    assert_eq!(before.buy_orders.len(), 1);
    assert_eq!(before.buy_orders[0].token_price, Some(dec("2")));

    let traded = events::Trade {
        id: U256::from(1),
        user: taker(),
        tokenGet: base(),
        amountGet: U256::from(2 * ONE),
        tokenGive: quote(),
        amountGive: U256::from(ONE),
        creator: maker(),
        timestamp: U256::from(START + 60),
    };
    let log = Log {
        address: exchange,
        data: traded.encode_log_data(),
    };
    assert!(processor.process_log(&log).unwrap());

    assert!(pipeline.order_book().unwrap().buy_orders.is_empty());
    assert_eq!(pipeline.trade_tape().unwrap().len(), 1);
    assert_eq!(pipeline.price_chart().unwrap().last_price, dec("2"));
    assert_eq!(pipeline.my_events().unwrap().len(), 2);
}
