use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::{OrderId, TradeRecord};

/// Represents a fill (trade) of a submitted order.
///
/// Give/get fields are the creator's, so a fill prices the same way as the
/// order it executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRecord {
    /// Id of the filled order
    pub id: OrderId,
    /// Filler (taker) address
    pub user: Address,
    /// Original submitter of the order
    pub creator: Address,
    pub token_get: Address,
    pub amount_get: U256,
    pub token_give: Address,
    pub amount_give: U256,
    /// Unix seconds
    pub timestamp: u64,
}

impl FillRecord {
    /// Whether the account took part in this trade on either side
    pub fn involves(&self, account: &Address) -> bool {
        self.user == *account || self.creator == *account
    }
}

impl TradeRecord for FillRecord {
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
