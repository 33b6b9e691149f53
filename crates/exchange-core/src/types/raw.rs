//! Loosely typed event records as delivered by the event listener.
//!
//! Ids, amounts and timestamps may arrive as JSON numbers or as decimal/hex
//! strings. Conversion into the typed records validates every field.

use crate::error::{ExchangeError, Result};
use alloy_primitives::{Address, U256};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{CancelRecord, FillRecord, Order, OrderId, MAX_TIMESTAMP};

/// Number that may be encoded as a JSON integer or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(u64),
    Text(String),
}

impl RawNumber {
    fn to_u256(&self, field: &'static str) -> Result<U256> {
        match self {
            RawNumber::Int(v) => Ok(U256::from(*v)),
            RawNumber::Text(s) => {
                U256::from_str(s.trim()).map_err(|e| ExchangeError::invalid(field, e))
            }
        }
    }

    fn to_timestamp(&self) -> Result<u64> {
        let value = self.to_u256("timestamp")?;
        if value > U256::from(MAX_TIMESTAMP) {
            return Err(ExchangeError::invalid("timestamp", format!("{value} out of range")));
        }
        Ok(value.to::<u64>())
    }

    fn to_order_id(&self) -> Result<OrderId> {
        match self {
            RawNumber::Int(v) => Ok(OrderId::from(*v)),
            RawNumber::Text(s) => OrderId::parse(s),
        }
    }
}

fn parse_address(field: &'static str, s: &str) -> Result<Address> {
    Address::from_str(s.trim()).map_err(|e| ExchangeError::invalid(field, e))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: RawNumber,
    pub user: String,
    pub token_get: String,
    pub amount_get: RawNumber,
    pub token_give: String,
    pub amount_give: RawNumber,
    pub timestamp: RawNumber,
}

impl TryFrom<RawOrder> for Order {
    type Error = ExchangeError;

    fn try_from(raw: RawOrder) -> Result<Self> {
        Ok(Order {
            id: raw.id.to_order_id()?,
            user: parse_address("user", &raw.user)?,
            token_get: parse_address("tokenGet", &raw.token_get)?,
            amount_get: raw.amount_get.to_u256("amountGet")?,
            token_give: parse_address("tokenGive", &raw.token_give)?,
            amount_give: raw.amount_give.to_u256("amountGive")?,
            timestamp: raw.timestamp.to_timestamp()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCancel {
    pub id: RawNumber,
    pub user: String,
    pub timestamp: RawNumber,
}

impl TryFrom<RawCancel> for CancelRecord {
    type Error = ExchangeError;

    fn try_from(raw: RawCancel) -> Result<Self> {
        Ok(CancelRecord {
            id: raw.id.to_order_id()?,
            user: parse_address("user", &raw.user)?,
            timestamp: raw.timestamp.to_timestamp()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFill {
    pub id: RawNumber,
    pub user: String,
    pub creator: String,
    pub token_get: String,
    pub amount_get: RawNumber,
    pub token_give: String,
    pub amount_give: RawNumber,
    pub timestamp: RawNumber,
}

impl TryFrom<RawFill> for FillRecord {
    type Error = ExchangeError;

    fn try_from(raw: RawFill) -> Result<Self> {
        Ok(FillRecord {
            id: raw.id.to_order_id()?,
            user: parse_address("user", &raw.user)?,
            creator: parse_address("creator", &raw.creator)?,
            token_get: parse_address("tokenGet", &raw.token_get)?,
            amount_get: raw.amount_get.to_u256("amountGet")?,
            token_give: parse_address("tokenGive", &raw.token_give)?,
            amount_give: raw.amount_give.to_u256("amountGive")?,
            timestamp: raw.timestamp.to_timestamp()?,
        })
    }
}

/// Event history dump: the three streams in arrival order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventLog {
    #[serde(default)]
    pub orders: Vec<RawOrder>,
    #[serde(default)]
    pub cancels: Vec<RawCancel>,
    #[serde(default)]
    pub fills: Vec<RawFill>,
}

impl RawEventLog {
    /// Load an event history dump from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
