use alloy_primitives::Log;
use alloy_sol_types::SolEvent;
use exchange_core::events;
use exchange_core::types::CancelRecord;
use exchange_core::{ExchangeError, Result};
use exchange_store::ExchangeStore;
use std::sync::Arc;
use tracing::debug;

pub struct OrderCancelledHandler {
    store: Arc<ExchangeStore>,
}

impl OrderCancelledHandler {
    pub fn new(store: Arc<ExchangeStore>) -> Self {
        Self { store }
    }

    /// Returns true if the cancel was new. Cancelling a filled order is an error.
    pub fn handle(&self, log: &Log) -> Result<bool> {
        let event = events::Cancel::decode_log(log)
            .map_err(|e| ExchangeError::EventDecode(e.to_string()))?;

        let cancel = CancelRecord::try_from(&event.data)?;

        debug!(
            order_id = %cancel.id,
            user = ?cancel.user,
            "Order cancelled"
        );

        self.store.add_cancel(cancel)
    }
}
