use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Base/quote selection as known to the caller; either side may still be loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: Option<Address>,
    pub quote: Option<Address>,
}

impl TradingPair {
    pub fn new(base: Address, quote: Address) -> Self {
        Self {
            base: Some(base),
            quote: Some(quote),
        }
    }

    /// Both assets known
    pub fn resolve(&self) -> Option<ResolvedPair> {
        Some(ResolvedPair {
            base: self.base?,
            quote: self.quote?,
        })
    }
}

/// Trading pair with both assets resolved. Prices are quote per base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedPair {
    pub base: Address,
    pub quote: Address,
}

impl ResolvedPair {
    pub fn contains(&self, token: &Address) -> bool {
        *token == self.base || *token == self.quote
    }
}
