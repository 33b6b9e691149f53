use alloy_primitives::Log;
use alloy_sol_types::SolEvent;
use exchange_core::events;
use exchange_core::types::FillRecord;
use exchange_core::{ExchangeError, Result};
use exchange_store::ExchangeStore;
use std::sync::Arc;
use tracing::debug;

pub struct OrderFilledHandler {
    store: Arc<ExchangeStore>,
}

impl OrderFilledHandler {
    pub fn new(store: Arc<ExchangeStore>) -> Self {
        Self { store }
    }

    /// Returns true if the fill was new (first fill wins)
    pub fn handle(&self, log: &Log) -> Result<bool> {
        let event = events::Trade::decode_log(log)
            .map_err(|e| ExchangeError::EventDecode(e.to_string()))?;

        let fill = FillRecord::try_from(&event.data)?;

        debug!(
            order_id = %fill.id,
            filler = ?fill.user,
            creator = ?fill.creator,
            "Order filled"
        );

        Ok(self.store.add_fill(fill))
    }
}
