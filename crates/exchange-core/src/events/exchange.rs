use crate::error::{ExchangeError, Result};
use crate::types::{self, OrderId, MAX_TIMESTAMP};
use alloy_primitives::U256;
use alloy_sol_types::sol;

sol! {
    /// Emitted when an order is submitted
    #[derive(Debug)]
    event Order(
        uint256 id,
        address user,
        address tokenGet,
        uint256 amountGet,
        address tokenGive,
        uint256 amountGive,
        uint256 timestamp
    );

    /// Emitted when the submitter cancels an order
    #[derive(Debug)]
    event Cancel(
        uint256 id,
        address user,
        address tokenGet,
        uint256 amountGet,
        address tokenGive,
        uint256 amountGive,
        uint256 timestamp
    );

    /// Emitted when an order is filled. `user` is the filler.
    #[derive(Debug)]
    event Trade(
        uint256 id,
        address user,
        address tokenGet,
        uint256 amountGet,
        address tokenGive,
        uint256 amountGive,
        address creator,
        uint256 timestamp
    );
}

/// Block timestamps are uint256 on chain
fn timestamp_secs(value: U256) -> Result<u64> {
    if value > U256::from(MAX_TIMESTAMP) {
        return Err(ExchangeError::InvalidRecord {
            field: "timestamp",
            reason: format!("{value} out of range"),
        });
    }
    Ok(value.to::<u64>())
}

impl TryFrom<&Order> for types::Order {
    type Error = ExchangeError;

    fn try_from(event: &Order) -> Result<Self> {
        Ok(types::Order {
            id: OrderId::new(event.id),
            user: event.user,
            token_get: event.tokenGet,
            amount_get: event.amountGet,
            token_give: event.tokenGive,
            amount_give: event.amountGive,
            timestamp: timestamp_secs(event.timestamp)?,
        })
    }
}

impl TryFrom<&Cancel> for types::CancelRecord {
    type Error = ExchangeError;

    fn try_from(event: &Cancel) -> Result<Self> {
        Ok(types::CancelRecord {
            id: OrderId::new(event.id),
            user: event.user,
            timestamp: timestamp_secs(event.timestamp)?,
        })
    }
}

impl TryFrom<&Trade> for types::FillRecord {
    type Error = ExchangeError;

    fn try_from(event: &Trade) -> Result<Self> {
        Ok(types::FillRecord {
            id: OrderId::new(event.id),
            user: event.user,
            creator: event.creator,
            token_get: event.tokenGet,
            amount_get: event.amountGet,
            token_give: event.tokenGive,
            amount_give: event.amountGive,
            timestamp: timestamp_secs(event.timestamp)?,
        })
    }
}
