use crate::bucket::CandleBucket;
use crate::interval::CandleInterval;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Trade data for candlestick aggregation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeData {
    pub timestamp: u64,
    pub price: Decimal,
    pub base_quantity: Decimal,
    pub quote_quantity: Decimal,
}

/// Groups time-ordered trades into interval buckets
#[derive(Debug, Clone, Copy)]
pub struct CandleAggregator {
    interval: CandleInterval,
    offset: FixedOffset,
}

impl CandleAggregator {
    pub fn new(interval: CandleInterval, offset: FixedOffset) -> Self {
        Self { interval, offset }
    }

    /// Build one candle per occupied bucket, ascending by open time.
    ///
    /// Trades must already be in ascending time order: within a bucket the
    /// first trade seen opens the candle and the last one closes it.
    pub fn build<I>(&self, trades: I) -> Vec<CandleBucket>
    where
        I: IntoIterator<Item = TradeData>,
    {
        let mut buckets: BTreeMap<u64, CandleBucket> = BTreeMap::new();
        let mut trade_count = 0usize;

        for trade in trades {
            trade_count += 1;
            let open_time = self.interval.bucket_open_time(trade.timestamp, &self.offset);
            buckets
                .entry(open_time)
                .and_modify(|bucket| {
                    bucket.update(trade.price, trade.base_quantity, trade.quote_quantity)
                })
                .or_insert_with(|| {
                    CandleBucket::new(
                        self.interval,
                        &self.offset,
                        trade.timestamp,
                        trade.price,
                        trade.base_quantity,
                        trade.quote_quantity,
                    )
                });
        }

        debug!(
            interval = %self.interval,
            trades = trade_count,
            candles = buckets.len(),
            "Built candles"
        );

        buckets.into_values().collect()
    }
}
