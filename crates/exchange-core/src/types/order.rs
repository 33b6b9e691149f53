use crate::error::{ExchangeError, Result};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ResolvedPair;

/// Latest accepted timestamp. Later values cannot be placed on a signed
/// clock and are rejected at ingestion.
pub const MAX_TIMESTAMP: u64 = i64::MAX as u64;

/// Canonical order identifier.
///
/// Every id entering the pipeline goes through [`OrderId::parse`] or one of the
/// `From` impls, so equality never depends on how the id was spelled upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(U256);

impl OrderId {
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Parse a decimal or `0x`-prefixed hex id
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ExchangeError::InvalidOrderId(s.to_string()));
        }
        U256::from_str(trimmed)
            .map(Self)
            .map_err(|_| ExchangeError::InvalidOrderId(s.to_string()))
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for OrderId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl FromStr for OrderId {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side (buy or sell) relative to the base asset of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn opposite(&self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Give/get view shared by submitted orders and fills
pub trait TradeRecord {
    fn id(&self) -> OrderId;
    fn user(&self) -> Address;
    fn token_get(&self) -> Address;
    fn amount_get(&self) -> U256;
    fn token_give(&self) -> Address;
    fn amount_give(&self) -> U256;
    fn timestamp(&self) -> u64;

    /// Both assets belong to the pair
    fn in_pair(&self, pair: &ResolvedPair) -> bool {
        pair.contains(&self.token_get()) && pair.contains(&self.token_give())
    }

    /// Buy when the record gives the quote asset
    fn side(&self, pair: &ResolvedPair) -> OrderSide {
        if self.token_give() == pair.quote {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }
}

/// Order as submitted to the exchange. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Submitting account
    pub user: Address,
    pub token_get: Address,
    /// 18-decimal fixed point
    pub amount_get: U256,
    pub token_give: Address,
    /// 18-decimal fixed point
    pub amount_give: U256,
    /// Unix seconds
    pub timestamp: u64,
}

impl TradeRecord for Order {
    fn id(&self) -> OrderId {
        self.id
    }

    fn user(&self) -> Address {
        self.user
    }

    fn token_get(&self) -> Address {
        self.token_get
    }

    fn amount_get(&self) -> U256 {
        self.amount_get
    }

    fn token_give(&self) -> Address {
        self.token_give
    }

    fn amount_give(&self) -> U256 {
        self.amount_give
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Cancellation of a previously submitted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRecord {
    pub id: OrderId,
    pub user: Address,
    pub timestamp: u64,
}
