use chrono::{FixedOffset, Local, Offset};
use exchange_candles::CandleInterval;
use exchange_core::config::sanitize;
use exchange_core::{ExchangeError, Result};
use std::env;

/// Settings that shape every derived view
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Price chart bucket width
    pub candle_interval: CandleInterval,
    /// Wall clock used for formatted timestamps and candle alignment
    pub utc_offset: FixedOffset,
}

impl PipelineConfig {
    pub fn new(candle_interval: CandleInterval, utc_offset: FixedOffset) -> Self {
        Self {
            candle_interval,
            utc_offset,
        }
    }

    /// Hourly candles on the host's current local offset
    pub fn local() -> Self {
        Self::new(CandleInterval::Hour1, local_offset())
    }

    /// Load from `CANDLE_INTERVAL` (default `1h`) and `UTC_OFFSET_SECS`
    /// (default: the host's local offset)
    pub fn from_env() -> Result<Self> {
        let candle_interval = match env::var("CANDLE_INTERVAL") {
            Ok(value) => sanitize(&value)
                .parse::<CandleInterval>()
                .map_err(|e| ExchangeError::Config {
                    key: "CANDLE_INTERVAL",
                    reason: e.to_string(),
                })?,
            Err(_) => CandleInterval::Hour1,
        };

        let utc_offset = match env::var("UTC_OFFSET_SECS") {
            Ok(value) => {
                let secs = sanitize(&value)
                    .parse::<i32>()
                    .map_err(|e| ExchangeError::Config {
                        key: "UTC_OFFSET_SECS",
                        reason: e.to_string(),
                    })?;
                FixedOffset::east_opt(secs).ok_or_else(|| ExchangeError::Config {
                    key: "UTC_OFFSET_SECS",
                    reason: format!("{secs} is not a valid offset"),
                })?
            }
            Err(_) => local_offset(),
        };

        Ok(Self {
            candle_interval,
            utc_offset,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::local()
    }
}

fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}
