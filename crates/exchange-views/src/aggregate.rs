use exchange_candles::{CandleAggregator, CandleBucket, TradeData};
use exchange_core::types::{DecoratedOrder, FillRecord, Order, OrderSide, OrderSign, TradeRecord};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::decorate::decorate_filled_order;

/// Open orders split by direction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    /// Highest price first
    pub buy_orders: Vec<DecoratedOrder<Order>>,
    /// Highest price first as well, see DESIGN.md
    pub sell_orders: Vec<DecoratedOrder<Order>>,
}

/// Candle series plus the latest price move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChart {
    pub last_price: Decimal,
    pub last_price_change: OrderSign,
    pub candles: Vec<CandleBucket>,
}

/// Stable sort, oldest first
pub fn sort_ascending<R: TradeRecord>(orders: &mut [DecoratedOrder<R>]) {
    orders.sort_by_key(|o| o.timestamp());
}

/// Stable sort, newest first
pub fn sort_descending<R: TradeRecord>(orders: &mut [DecoratedOrder<R>]) {
    orders.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
}

/// Partition order-book-decorated orders by side and sort each side by price
/// descending. Orders without a side are ignored.
pub fn group_order_book(orders: Vec<DecoratedOrder<Order>>) -> OrderBook {
    let (mut buy_orders, mut sell_orders): (Vec<_>, Vec<_>) = orders
        .into_iter()
        .filter(|o| o.order_type.is_some())
        .partition(|o| o.order_type == Some(OrderSide::Buy));

    buy_orders.sort_by(|a, b| b.token_price.cmp(&a.token_price));
    sell_orders.sort_by(|a, b| b.token_price.cmp(&a.token_price));

    OrderBook {
        buy_orders,
        sell_orders,
    }
}

/// Build the chart from fills already sorted oldest first.
///
/// `last_price_change` compares the two most recent fills; a missing fill
/// counts as price zero.
pub fn build_price_chart(
    fills: &[DecoratedOrder<FillRecord>],
    aggregator: &CandleAggregator,
) -> PriceChart {
    let prices: Vec<Decimal> = fills.iter().filter_map(|f| f.token_price).collect();

    let last_price = prices.last().copied().unwrap_or(Decimal::ZERO);
    let second_last_price = prices
        .len()
        .checked_sub(2)
        .map(|i| prices[i])
        .unwrap_or(Decimal::ZERO);

    let last_price_change = if last_price >= second_last_price {
        OrderSign::Plus
    } else {
        OrderSign::Minus
    };

    let candles = aggregator.build(fills.iter().filter_map(|f| {
        f.token_price.map(|price| TradeData {
            timestamp: f.timestamp(),
            price,
            base_quantity: f.token0_amount,
            quote_quantity: f.token1_amount,
        })
    }));

    PriceChart {
        last_price,
        last_price_change,
        candles,
    }
}

/// Color every fill against its predecessor, then order newest first.
///
/// Input must be sorted oldest first; the scan runs before the re-sort.
pub fn color_trade_tape(fills: Vec<DecoratedOrder<FillRecord>>) -> Vec<DecoratedOrder<FillRecord>> {
    let Some(first) = fills.first().cloned() else {
        return fills;
    };

    let mut previous = first;
    let mut colored: Vec<DecoratedOrder<FillRecord>> = fills
        .into_iter()
        .map(|fill| {
            let fill = decorate_filled_order(fill, &previous);
            previous = fill.clone();
            fill
        })
        .collect();

    sort_descending(&mut colored);
    colored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::{decorate_order, decorate_order_book_order};
    use crate::fixtures::*;
    use chrono::FixedOffset;
    use exchange_candles::CandleInterval;
    use exchange_core::types::PriceColor;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn book_order(order: Order) -> DecoratedOrder<Order> {
        let pair = resolved();
        decorate_order_book_order(decorate_order(&order, &pair, &utc()).unwrap(), &pair)
    }

    fn decorated_fill(id: u64, price: &str, timestamp: u64) -> DecoratedOrder<FillRecord> {
        decorate_order(&fill(id, price, timestamp), &resolved(), &utc()).unwrap()
    }

    fn prices<R>(orders: &[DecoratedOrder<R>]) -> Vec<Decimal> {
        orders.iter().map(|o| o.token_price.unwrap()).collect()
    }

    #[test]
    fn test_buy_side_sorted_best_first() {
        let book = group_order_book(vec![
            book_order(buy(1, "10", START)),
            book_order(buy(2, "30", START)),
            book_order(buy(3, "20", START)),
        ]);

        assert_eq!(prices(&book.buy_orders), vec![dec("30"), dec("20"), dec("10")]);
        assert!(book.sell_orders.is_empty());
    }

    #[test]
    fn test_sell_side_also_descending() {
        let book = group_order_book(vec![
            book_order(sell(1, "1.5", START)),
            book_order(buy(2, "4", START)),
            book_order(sell(3, "2.5", START)),
        ]);

        assert_eq!(prices(&book.sell_orders), vec![dec("2.5"), dec("1.5")]);
        assert_eq!(book.buy_orders.len(), 1);
    }

    #[test]
    fn test_equal_prices_keep_input_order() {
        let book = group_order_book(vec![
            book_order(buy(1, "5", START)),
            book_order(buy(2, "5", START)),
        ]);
        let ids: Vec<u64> = book
            .buy_orders
            .iter()
            .map(|o| o.record.id.as_u256().to::<u64>())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_price_chart_single_hour() {
        let aggregator = CandleAggregator::new(CandleInterval::Hour1, utc());
        let fills = vec![
            decorated_fill(1, "5", START),
            decorated_fill(2, "8", START + 60),
            decorated_fill(3, "3", START + 120),
        ];

        let chart = build_price_chart(&fills, &aggregator);
        assert_eq!(chart.candles.len(), 1);
        let candle = &chart.candles[0];
        assert_eq!(candle.open, dec("5"));
        assert_eq!(candle.high, dec("8"));
        assert_eq!(candle.low, dec("3"));
        assert_eq!(candle.close, dec("3"));

        assert_eq!(chart.last_price, dec("3"));
        assert_eq!(chart.last_price_change, OrderSign::Minus);
    }

    #[test]
    fn test_price_chart_defaults() {
        let aggregator = CandleAggregator::new(CandleInterval::Hour1, utc());

        let empty = build_price_chart(&[], &aggregator);
        assert_eq!(empty.last_price, Decimal::ZERO);
        assert_eq!(empty.last_price_change, OrderSign::Plus);
        assert!(empty.candles.is_empty());

        let single = build_price_chart(&[decorated_fill(1, "2", START)], &aggregator);
        assert_eq!(single.last_price, dec("2"));
        assert_eq!(single.last_price_change, OrderSign::Plus);
    }

    #[test]
    fn test_trade_tape_colors_before_resort() {
        let tape = color_trade_tape(vec![
            decorated_fill(1, "10", START),
            decorated_fill(2, "12", START + 10),
            decorated_fill(3, "9", START + 20),
        ]);

        assert_eq!(prices(&tape), vec![dec("9"), dec("12"), dec("10")]);
        let colors: Vec<PriceColor> = tape.iter().map(|f| f.token_price_class.unwrap()).collect();
        assert_eq!(colors, vec![PriceColor::Red, PriceColor::Green, PriceColor::Green]);
    }

    #[test]
    fn test_trade_tape_equal_price_is_green() {
        let tape = color_trade_tape(vec![
            decorated_fill(1, "10", START),
            decorated_fill(2, "10", START + 10),
        ]);
        assert!(tape
            .iter()
            .all(|f| f.token_price_class == Some(PriceColor::Green)));
        assert!(color_trade_tape(Vec::new()).is_empty());
    }
}
