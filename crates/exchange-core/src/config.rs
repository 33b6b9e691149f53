use crate::error::{ExchangeError, Result};
use crate::types::TradingPair;
use alloy_primitives::Address;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Selection state supplied by the host: which pair is shown and who is looking
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfig {
    pub pair: TradingPair,
    /// Connected wallet, if any
    pub account: Option<Address>,
    /// Event history dump to load at startup
    pub snapshot_path: Option<PathBuf>,
}

impl ExchangeConfig {
    /// Load selection state from environment variables.
    /// Unset variables leave the corresponding field unresolved.
    pub fn from_env() -> Result<Self> {
        let base = optional_address("BASE_TOKEN")?;
        let quote = optional_address("QUOTE_TOKEN")?;
        let account = optional_address("ACCOUNT")?;

        let snapshot_path = env::var("SNAPSHOT_PATH")
            .ok()
            .map(|p| sanitize(&p))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            pair: TradingPair { base, quote },
            account,
            snapshot_path,
        })
    }
}

fn optional_address(key: &'static str) -> Result<Option<Address>> {
    match env::var(key) {
        Ok(value) => {
            let value = sanitize(&value);
            if value.is_empty() {
                return Ok(None);
            }
            Address::from_str(&value)
                .map(Some)
                .map_err(|e| ExchangeError::Config {
                    key,
                    reason: e.to_string(),
                })
        }
        Err(_) => Ok(None),
    }
}

/// Remove surrounding quotes and whitespace
pub fn sanitize(value: &str) -> String {
    let trimmed = value.trim();
    let without_quotes = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    without_quotes.to_string()
}
