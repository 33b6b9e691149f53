pub mod aggregator;
pub mod bucket;
pub mod interval;

pub use aggregator::{CandleAggregator, TradeData};
pub use bucket::CandleBucket;
pub use interval::CandleInterval;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandleError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}

pub type Result<T> = std::result::Result<T, CandleError>;
