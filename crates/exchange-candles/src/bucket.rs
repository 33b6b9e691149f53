use crate::interval::CandleInterval;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use serde::Serialize;

/// OHLC summary of the fills that landed in one interval
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleBucket {
    /// Interval for this bucket
    pub interval: CandleInterval,
    /// Bucket open timestamp
    pub open_time: u64,
    /// Bucket close timestamp (exclusive)
    pub close_time: u64,
    /// First price in the bucket
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Last price in the bucket
    pub close: Decimal,
    /// Base volume
    pub volume: Decimal,
    /// Quote volume
    pub quote_volume: Decimal,
    /// Trade count
    pub count: u32,
}

impl CandleBucket {
    /// Create a new bucket from first trade
    pub fn new(
        interval: CandleInterval,
        offset: &FixedOffset,
        timestamp: u64,
        price: Decimal,
        base_quantity: Decimal,
        quote_quantity: Decimal,
    ) -> Self {
        Self {
            interval,
            open_time: interval.bucket_open_time(timestamp, offset),
            close_time: interval.bucket_close_time(timestamp, offset),
            open: price,
            high: price,
            low: price,
            close: price,
            volume: base_quantity,
            quote_volume: quote_quantity,
            count: 1,
        }
    }

    /// Update bucket with the next trade in time order.
    /// Strict comparisons keep the first occurrence on ties.
    pub fn update(&mut self, price: Decimal, base_quantity: Decimal, quote_quantity: Decimal) {
        if price > self.high {
            self.high = price;
        }
        if price < self.low {
            self.low = price;
        }
        self.close = price;
        self.volume += base_quantity;
        self.quote_volume += quote_quantity;
        self.count += 1;
    }
}
