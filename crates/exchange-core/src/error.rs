use crate::types::OrderId;
use alloy_primitives::U256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid configuration value for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("Invalid order id: {0}")]
    InvalidOrderId(String),

    #[error("Invalid {field}: {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    #[error("Amount does not fit a decimal quantity: {0}")]
    AmountOverflow(U256),

    #[error("Order {0} is both filled and cancelled")]
    DuplicateTerminalState(OrderId),

    #[error("Event decode error: {0}")]
    EventDecode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExchangeError {
    pub(crate) fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidRecord {
            field,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
